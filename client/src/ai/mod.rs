//! AI 模組 - 自動出牌的 bot
//!
//! - BotPlayer: 玩家身分與選定的策略
//! - Strategy: 具名策略 (curses / fancy / smithy / default)
//! - TurnStrategy: 行動與購買決策的 trait

mod player;
mod strategy;

pub use player::BotPlayer;
pub use strategy::{Strategy, TurnStrategy};
