use crate::error::ConfigError;
use clap::Parser;

/// Dominion bot - 連上 Dominai 伺服器並自動進行一局遊戲
#[derive(Parser, Debug)]
#[command(name = "dominion-bot")]
#[command(version, about, long_about = None)]
pub struct ClientArgs {
    /// Dominai HTTP endpoint (可帶或不帶 ?name=)
    #[arg(long, alias = "http_endpoint", env = "DOMINAI_ENDPOINT")]
    pub http_endpoint: String,

    /// 玩家編號 (連線名稱為 player<編號>)
    #[arg(long, env = "DOMINAI_PLAYER")]
    pub player: String,

    /// 策略名稱: curses, fancy, smithy, default
    #[arg(long, env = "DOMINAI_STRATEGY")]
    pub strategy: String,
}

/// 將 HTTP endpoint 轉為帶玩家名稱的 WebSocket URL
///
/// `http` 換成 `ws` (https 變成 wss)，移除原有的 `?name=`，再加上新的名稱。
pub fn websocket_url(http_endpoint: &str, player_name: &str) -> Result<String, ConfigError> {
    let endpoint = http_endpoint.trim();
    let rest = endpoint
        .strip_prefix("http")
        .filter(|rest| rest.starts_with("://") || rest.starts_with("s://"))
        .ok_or_else(|| ConfigError::Scheme(endpoint.to_string()))?;

    let base = rest.split_once("?name=").map_or(rest, |(base, _)| base);

    Ok(format!("ws{}?name={}", base, player_name))
}
