//! Bot 玩家定義

use super::strategy::Strategy;

/// 連上伺服器的 bot 玩家
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotPlayer {
    /// 連線時使用的名稱 (e.g., "player1")
    pub name: String,
    pub strategy: Strategy,
}

impl BotPlayer {
    /// 依玩家編號建立，名稱固定為 `player<編號>`
    pub fn new(player: &str, strategy: Strategy) -> Self {
        Self {
            name: format!("player{}", player.trim()),
            strategy,
        }
    }
}
