//! 測試用的腳本化傳輸層

use super::Transport;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

/// 依序回放預先排好的 inbound 訊息，並記錄所有送出的訊息
///
/// 佇列耗盡時視為連線關閉。
pub struct ScriptedTransport {
    inbound: VecDeque<String>,
    sent: Rc<RefCell<Vec<String>>>,
    closed: Rc<Cell<bool>>,
}

/// 測試端保留的觀察把手
#[derive(Clone)]
pub struct TransportLog {
    sent: Rc<RefCell<Vec<String>>>,
    closed: Rc<Cell<bool>>,
}

impl ScriptedTransport {
    pub fn new<I, S>(frames: I) -> (Self, TransportLog)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sent = Rc::new(RefCell::new(Vec::new()));
        let closed = Rc::new(Cell::new(false));
        let transport = Self {
            inbound: frames.into_iter().map(Into::into).collect(),
            sent: Rc::clone(&sent),
            closed: Rc::clone(&closed),
        };
        (transport, TransportLog { sent, closed })
    }
}

impl Transport for ScriptedTransport {
    fn send(&mut self, text: &str) -> io::Result<()> {
        self.sent.borrow_mut().push(text.to_string());
        Ok(())
    }

    fn receive(&mut self) -> io::Result<Option<String>> {
        Ok(self.inbound.pop_front())
    }

    fn close(&mut self) -> io::Result<()> {
        self.closed.set(true);
        Ok(())
    }
}

impl TransportLog {
    /// 已送出的訊息 (解析為 JSON)
    pub fn sent(&self) -> Vec<serde_json::Value> {
        self.sent
            .borrow()
            .iter()
            .map(|text| serde_json::from_str(text).unwrap())
            .collect()
    }

    /// 已送出的 (method, card) 序列，回覆類訊息以 "reply" 表示
    pub fn calls(&self) -> Vec<(String, Option<String>)> {
        self.sent()
            .iter()
            .map(|msg| {
                let method = msg["method"].as_str().unwrap_or("reply").to_string();
                let card = msg["params"]["card"].as_str().map(str::to_string);
                (method, card)
            })
            .collect()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }
}
