pub mod cards;
pub mod state;

pub use state::SessionState;
