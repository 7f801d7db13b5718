use super::cards;
use crate::protocol::{Card, StateUpdate};
use std::collections::HashMap;
use std::fmt;

const TURN_START_BUYS: u32 = 1;
const TURN_START_ACTIONS: u32 = 1;

/// 本局遊戲的客戶端狀態
///
/// 每局建立一次，之後由伺服器的回應逐欄位刷新。
/// `actions` / `buys` 不在本地扣減，一律以伺服器回傳為準。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// 手牌 (保持伺服器給的順序)
    pub hand: Vec<Card>,
    pub discard_count: u32,
    pub deck_count: u32,
    /// 本局買過的牌，只增不減
    pub acquired_cards: Vec<Card>,
    /// 供應區剩餘數量
    pub supply: HashMap<Card, u32>,
    pub buys: u32,
    pub actions: u32,
    pub treasure: u32,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            hand: Vec::new(),
            discard_count: 0,
            deck_count: 0,
            acquired_cards: Vec::new(),
            supply: HashMap::new(),
            buys: TURN_START_BUYS,
            actions: TURN_START_ACTIONS,
            treasure: 0,
        }
    }

    /// 回合開始: 資源回到預設值，再套用伺服器的 params
    pub fn begin_turn(&mut self, update: StateUpdate) {
        self.buys = TURN_START_BUYS;
        self.actions = TURN_START_ACTIONS;
        self.treasure = 0;
        self.apply(update);
    }

    /// 套用部分更新，缺少的欄位保持不變
    pub fn apply(&mut self, update: StateUpdate) {
        let StateUpdate {
            hand,
            discard,
            deck,
            supply,
            buys,
            actions,
            treasure,
        } = update;

        if let Some(hand) = hand {
            self.hand = hand;
        }
        if let Some(discard) = discard {
            self.discard_count = discard;
        }
        if let Some(deck) = deck {
            self.deck_count = deck;
        }
        if let Some(supply) = supply {
            self.supply = supply;
        }
        if let Some(buys) = buys {
            self.buys = buys;
        }
        if let Some(actions) = actions {
            self.actions = actions;
        }
        if let Some(treasure) = treasure {
            self.treasure = treasure;
        }
    }

    /// 供應區剩餘數量，不在供應區的牌視為 0
    pub fn supply_count(&self, card: &str) -> u32 {
        self.supply.get(card).copied().unwrap_or(0)
    }

    /// 牌是否出現在供應區 (不看數量)
    pub fn in_supply(&self, card: &str) -> bool {
        self.supply.contains_key(card)
    }

    pub fn can_buy(&self, card: &str) -> bool {
        self.supply_count(card) > 0
    }

    pub fn in_hand(&self, card: &str) -> bool {
        self.hand.iter().any(|c| c == card)
    }

    /// 本局已買過幾張
    pub fn acquired_count(&self, card: &str) -> usize {
        self.acquired_cards.iter().filter(|c| *c == card).count()
    }

    pub fn record_purchase(&mut self, card: impl Into<Card>) {
        self.acquired_cards.push(card.into());
    }

    /// 手牌中的錢幣牌 (依手牌順序)
    pub fn treasures_in_hand(&self) -> Vec<Card> {
        self.hand
            .iter()
            .filter(|c| cards::is_treasure(c))
            .cloned()
            .collect()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${} | {} actions | {} buys | {} discard | {} deck | hand: {:?}",
            self.treasure, self.actions, self.buys, self.discard_count, self.deck_count, self.hand
        )
    }
}
