use super::connector::connect_tcp;
use crate::error::ConfigError;
use log::debug;
use std::io;
use std::net::TcpStream;
use tungstenite::http::Uri;
use tungstenite::{Message, WebSocket};

const DEFAULT_WS_PORT: u16 = 80;

/// 訊息式傳輸層
///
/// Session 只透過這三個操作與伺服器溝通，不處理重連或分框。
pub trait Transport {
    /// 送出一則文字訊息
    fn send(&mut self, text: &str) -> io::Result<()>;

    /// 阻塞直到收到下一則訊息，連線關閉時回傳 `None`
    fn receive(&mut self) -> io::Result<Option<String>>;

    /// 關閉連線
    fn close(&mut self) -> io::Result<()>;
}

/// 以 tungstenite 實作的 WebSocket 傳輸層 (僅 ws://)
pub struct WsTransport {
    socket: WebSocket<TcpStream>,
}

impl WsTransport {
    /// 建立 TCP 連線並完成 WebSocket handshake
    pub fn connect(url: &str) -> Result<Self, ConfigError> {
        let uri: Uri = url
            .parse()
            .map_err(|_| ConfigError::InvalidUrl(url.to_string()))?;

        match uri.scheme_str() {
            Some("ws") => {}
            Some("wss") => return Err(ConfigError::TlsUnsupported),
            _ => return Err(ConfigError::InvalidUrl(url.to_string())),
        }

        let host = uri
            .host()
            .ok_or_else(|| ConfigError::InvalidUrl(url.to_string()))?;
        let port = uri.port_u16().unwrap_or(DEFAULT_WS_PORT);

        let stream = connect_tcp(host, port).map_err(|source| ConfigError::Connect {
            addr: format!("{}:{}", host, port),
            source,
        })?;

        let (socket, response) =
            tungstenite::client(url, stream).map_err(|e| ConfigError::Handshake(e.to_string()))?;
        debug!("[NET] Handshake complete: {}", response.status());

        Ok(Self { socket })
    }
}

impl Transport for WsTransport {
    fn send(&mut self, text: &str) -> io::Result<()> {
        self.socket
            .send(Message::text(text.to_owned()))
            .map_err(into_io_error)
    }

    fn receive(&mut self) -> io::Result<Option<String>> {
        loop {
            match self.socket.read() {
                Ok(Message::Text(text)) => return Ok(Some(text.as_str().to_owned())),
                Ok(Message::Binary(bytes)) => {
                    return String::from_utf8(bytes.to_vec())
                        .map(Some)
                        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e));
                }
                Ok(Message::Close(frame)) => {
                    debug!("[NET] Close frame received: {:?}", frame);
                    return Ok(None);
                }
                // Ping / Pong 由 tungstenite 自動處理
                Ok(_) => continue,
                Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                    return Ok(None);
                }
                Err(e) => return Err(into_io_error(e)),
            }
        }
    }

    fn close(&mut self) -> io::Result<()> {
        match self.socket.close(None) {
            Ok(()) => Ok(()),
            Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => Ok(()),
            Err(e) => Err(into_io_error(e)),
        }
    }
}

fn into_io_error(e: tungstenite::Error) -> io::Error {
    match e {
        tungstenite::Error::Io(inner) => inner,
        other => io::Error::other(other.to_string()),
    }
}
