//! Session 模組 - 一局遊戲的協定狀態機
//!
//! - Session: 分派伺服器訊息直到 GameOver
//! - TurnOrchestrator: 行動 → 購買 → 結束回合

mod runner;
mod turn;

pub use runner::{GameSummary, Session};
