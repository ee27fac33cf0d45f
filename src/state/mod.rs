//! Conversation state module
//!
//! Only the operator's broadcast session is tracked; it lives in memory and is
//! never persisted.

pub mod session;

pub use session::BroadcastSession;
