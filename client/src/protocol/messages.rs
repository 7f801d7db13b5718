use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// JSON-RPC 版本字串
pub const JSONRPC_VERSION: &str = "2.0";

/// 卡牌名稱 (e.g., "Copper", "Smithy", "Province")
pub type Card = String;

/// 請求 ID
pub type RequestId = u64;

/// 客戶端發出的呼叫 (method + params)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "method", content = "params")]
pub enum ClientCall {
    /// 出牌 (行動牌或錢幣牌)
    Play {
        card: Card,
        data: Map<String, Value>,
    },

    /// 購買
    Buy { card: Card },

    /// 結束回合 (不帶 params)
    EndTurn,
}

impl ClientCall {
    pub fn play(card: impl Into<Card>) -> Self {
        ClientCall::Play {
            card: card.into(),
            data: Map::new(),
        }
    }

    pub fn buy(card: impl Into<Card>) -> Self {
        ClientCall::Buy { card: card.into() }
    }

    /// 方法名稱 (log 用)
    pub fn method(&self) -> &'static str {
        match self {
            ClientCall::Play { .. } => "Play",
            ClientCall::Buy { .. } => "Buy",
            ClientCall::EndTurn => "EndTurn",
        }
    }
}

/// 送出的請求封包
#[derive(Debug, Serialize)]
pub struct Request<'a> {
    pub jsonrpc: &'static str,
    pub id: RequestId,
    #[serde(flatten)]
    pub call: &'a ClientCall,
}

/// 回覆伺服器發起的呼叫
#[derive(Debug, Serialize)]
pub struct Reply {
    pub jsonrpc: &'static str,
    /// 原樣回傳伺服器的 id (缺少時為 null)
    pub id: Value,
    pub result: Value,
}

/// 伺服器回傳的狀態 (StartTurn params 與呼叫結果共用)
///
/// 每個欄位都可能缺少，缺少的欄位不更新本地狀態。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StateUpdate {
    pub hand: Option<Vec<Card>>,
    pub discard: Option<u32>,
    pub deck: Option<u32>,
    pub supply: Option<HashMap<Card, u32>>,
    pub buys: Option<u32>,
    pub actions: Option<u32>,
    pub treasure: Option<u32>,
}

/// 伺服器發起的呼叫
#[derive(Debug, Clone, PartialEq)]
pub enum ServerCall {
    /// 遊戲開始，需回覆空結果 (kingdom 只用於 log，原樣保留)
    StartGame { id: Value, kingdom: Value },
    /// 輪到我方
    StartTurn(StateUpdate),
    /// 遊戲結束 (params 原樣保留)
    GameOver(Value),
    /// 伺服器端無法恢復的錯誤
    FatalError(String),
    /// 不認識的 method
    Unknown(String),
}

/// 解析後的 inbound frame
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Call(ServerCall),
    Result {
        id: Option<RequestId>,
        result: StateUpdate,
    },
    Error {
        id: Option<RequestId>,
        error: Value,
    },
    /// 無 method / result / error，或不是 JSON 物件
    Ignored,
}

/// 原始 frame，只用於分類
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawFrame {
    pub method: Option<String>,
    pub id: Option<Value>,
    pub params: Option<Value>,
    pub message: Option<Value>,
    /// 有 `result` 鍵即為回應，`null` 也算
    #[serde(default, deserialize_with = "present")]
    pub result: Option<Value>,
    pub error: Option<Value>,
}

/// 欄位存在時一律為 `Some`，包含 `null`
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
