//! The order state store: a synchronous reducer wrapped in an actor.

mod service;
mod state;

pub use service::*;
pub use state::*;
