pub mod connector;
pub mod transport;

#[cfg(test)]
pub mod testing;

pub use transport::{Transport, WsTransport};
