//! Session orchestration around the conversation tree
//!
//! Holds the pieces that sit between the UI and the tree: reply generation,
//! the UI event dispatch, and the per-session store registry.

mod events;
mod responder;
mod session;

pub use events::{SessionView, UiEvent};
pub use responder::{EchoResponder, Responder, DEFAULT_PREFIX};
pub use session::{SessionError, SessionManager};
