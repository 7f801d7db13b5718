use super::messages::{
    ClientCall, Frame, JSONRPC_VERSION, RawFrame, Reply, Request, RequestId, ServerCall,
    StateUpdate,
};
use crate::error::SessionError;
use crate::net::Transport;
use log::{debug, warn};
use serde_json::Value;
use std::io;

/// JSON-RPC Codec - 在 Transport 之上處理 frame 的編碼與解碼
pub struct Codec<T: Transport> {
    transport: T,
    next_id: RequestId,
}

impl<T: Transport> Codec<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            next_id: 1,
        }
    }

    /// 送出呼叫，回傳使用的請求 ID
    pub fn send_call(&mut self, call: &ClientCall) -> Result<RequestId, SessionError> {
        let id = self.next_id;
        self.next_id += 1;

        let text = encode_call(id, call)?;
        debug!("[CODEC] -> {}", text);
        self.transport.send(&text)?;
        Ok(id)
    }

    /// 回覆伺服器發起的呼叫
    pub fn send_reply(&mut self, id: Value, result: Value) -> Result<(), SessionError> {
        let reply = Reply {
            jsonrpc: JSONRPC_VERSION,
            id,
            result,
        };
        let text = serde_json::to_string(&reply)?;
        debug!("[CODEC] -> {}", text);
        self.transport.send(&text)?;
        Ok(())
    }

    /// 讀取下一個 frame，連線關閉時回傳 `None`
    pub fn read_frame(&mut self) -> Result<Option<Frame>, SessionError> {
        match self.transport.receive()? {
            Some(text) => {
                debug!("[CODEC] <- {}", text);
                Ok(Some(decode_frame(&text)))
            }
            None => Ok(None),
        }
    }

    pub fn close(&mut self) -> io::Result<()> {
        self.transport.close()
    }
}

/// 編碼一個送出的呼叫
pub fn encode_call(id: RequestId, call: &ClientCall) -> serde_json::Result<String> {
    serde_json::to_string(&Request {
        jsonrpc: JSONRPC_VERSION,
        id,
        call,
    })
}

/// 解碼一個 inbound frame
///
/// 分類順序: method > error > result；都沒有或無法解析時為 `Frame::Ignored`。
pub fn decode_frame(text: &str) -> Frame {
    let raw: RawFrame = match serde_json::from_str(text) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("[CODEC] Skipping unparsable frame: {}", e);
            return Frame::Ignored;
        }
    };

    if let Some(method) = raw.method {
        return match decode_call(method, raw.id, raw.params, raw.message) {
            Some(call) => Frame::Call(call),
            None => Frame::Ignored,
        };
    }

    let id = raw.id.as_ref().and_then(Value::as_u64);

    if let Some(error) = raw.error {
        return Frame::Error { id, error };
    }

    if let Some(result) = raw.result {
        let result = if result.is_null() {
            StateUpdate::default()
        } else {
            serde_json::from_value(result).unwrap_or_else(|e| {
                warn!("[CODEC] Result {:?} has unexpected shape: {}", id, e);
                StateUpdate::default()
            })
        };
        return Frame::Result { id, result };
    }

    Frame::Ignored
}

fn decode_call(
    method: String,
    id: Option<Value>,
    params: Option<Value>,
    message: Option<Value>,
) -> Option<ServerCall> {
    let params = params.unwrap_or(Value::Null);

    let call = match method.as_str() {
        // kingdom 格式不對也要回覆，否則伺服器會一直等
        "StartGame" => ServerCall::StartGame {
            id: id.unwrap_or(Value::Null),
            kingdom: params.get("kingdom").cloned().unwrap_or(Value::Null),
        },
        "StartTurn" => ServerCall::StartTurn(parse_params(&method, params)?),
        "GameOver" => ServerCall::GameOver(params),
        "FatalError" => ServerCall::FatalError(render_message(message)),
        _ => ServerCall::Unknown(method),
    };
    Some(call)
}

/// 字串原樣使用，其他型別轉成 JSON 文字
fn render_message(message: Option<Value>) -> String {
    match message {
        Some(Value::String(text)) => text,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn parse_params<P>(method: &str, params: Value) -> Option<P>
where
    P: serde::de::DeserializeOwned + Default,
{
    if params.is_null() {
        return Some(P::default());
    }
    match serde_json::from_value(params) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!("[CODEC] Skipping {} with malformed params: {}", method, e);
            None
        }
    }
}
