//! 錯誤型別
//!
//! SessionError 為遊戲進行中無法恢復的錯誤，一律往上傳到 main 決定結束碼。

use crate::protocol::RequestId;
use serde_json::Value;
use std::io;
use thiserror::Error;

/// Session 錯誤 (皆為致命)
#[derive(Debug, Error)]
pub enum SessionError {
    /// 呼叫的回應帶有 error 欄位
    #[error("server rejected request {id:?}: {error}")]
    Protocol {
        id: Option<RequestId>,
        error: Value,
    },

    /// 伺服器推送 FatalError
    #[error("fatal error from server: {0}")]
    Fatal(String),

    /// 連線在遊戲結束前關閉
    #[error("connection closed before game over")]
    ConnectionClosed,

    #[error("transport error: {0}")]
    Transport(#[from] io::Error),

    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

/// 啟動設定 / 建立連線時的錯誤
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("endpoint must start with http:// or https://, got '{0}'")]
    Scheme(String),

    #[error("invalid websocket url '{0}'")]
    InvalidUrl(String),

    #[error("secure websocket (wss) endpoints are not supported")]
    TlsUnsupported,

    #[error("failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("websocket handshake failed: {0}")]
    Handshake(String),
}
