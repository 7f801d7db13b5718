pub mod codec;
pub mod messages;

pub use codec::Codec;
pub use messages::{Card, ClientCall, Frame, RequestId, ServerCall, StateUpdate};
