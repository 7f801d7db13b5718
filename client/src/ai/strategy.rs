//! 出牌與購買策略
//!
//! 提供可插拔的回合決策系統

use crate::game::SessionState;
use crate::game::cards::{
    ACTION_PRIORITY, CURSE, GOLD, MARKET, MERCHANT, MOAT, PROVINCE, SILVER, SMITHY, VILLAGE,
    WORKSHOP,
};
use crate::protocol::Card;
use log::warn;
use std::fmt;

/// 回合策略 trait
pub trait TurnStrategy {
    /// 行動階段: 選出下一張要打的行動牌
    ///
    /// 依固定優先順序取手牌中第一張符合的牌。
    fn next_action(&self, state: &SessionState) -> Option<&'static str> {
        ACTION_PRIORITY
            .iter()
            .find(|card| state.in_hand(card))
            .copied()
    }

    /// 購買階段: 依序回傳要購買的牌 (目前最多一張)
    fn select_purchases(&self, state: &SessionState) -> Vec<Card>;
}

/// 具名策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// 每回合都買 Curse
    Curses,
    /// Market / Smithy / Merchant / Village / Moat 混合
    Fancy,
    /// Big Money 加一張 Smithy
    Smithy,
    /// Big Money
    #[default]
    Default,
}

impl Strategy {
    /// 從名稱解析 (不分大小寫)，不認得的名稱使用 Default
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "curses" => Strategy::Curses,
            "fancy" => Strategy::Fancy,
            "smithy" => Strategy::Smithy,
            "default" | "money" | "" => Strategy::Default,
            other => {
                warn!("[AI] Unknown strategy '{}', falling back to default", other);
                Strategy::Default
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Curses => "curses",
            Strategy::Fancy => "fancy",
            Strategy::Smithy => "smithy",
            Strategy::Default => "default",
        }
    }

    /// 依序套用購買規則，第一條成立者勝出
    fn choose_purchase(&self, state: &SessionState) -> Option<&'static str> {
        let fancy = *self == Strategy::Fancy;
        let treasure = state.treasure;

        if *self == Strategy::Curses {
            return Some(CURSE);
        }
        if treasure >= 8 {
            return Some(PROVINCE);
        }
        if treasure >= 6 {
            return Some(GOLD);
        }
        if fancy && treasure >= 5 && state.in_supply(MARKET) && state.acquired_count(MARKET) < 3 {
            return Some(MARKET);
        }
        if matches!(self, Strategy::Fancy | Strategy::Smithy)
            && treasure >= 4
            && state.in_supply(SMITHY)
            && state.acquired_count(SMITHY) == 0
        {
            return Some(SMITHY);
        }
        // Merchant / Village 兩條規則看的是 Workshop 是否在供應區
        if fancy && treasure >= 3 && state.in_supply(WORKSHOP) && state.acquired_count(MERCHANT) == 0
        {
            return Some(MERCHANT);
        }
        if fancy && treasure >= 3 && state.in_supply(WORKSHOP) && state.acquired_count(VILLAGE) == 0
        {
            return Some(VILLAGE);
        }
        if treasure >= 3 {
            return Some(SILVER);
        }
        if fancy && treasure >= 2 && state.in_supply(MOAT) && state.acquired_count(MOAT) == 0 {
            return Some(MOAT);
        }
        None
    }
}

impl TurnStrategy for Strategy {
    fn select_purchases(&self, state: &SessionState) -> Vec<Card> {
        self.choose_purchase(state)
            .map(|card| vec![card.to_string()])
            .unwrap_or_default()
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
