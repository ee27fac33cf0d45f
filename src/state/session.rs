//! Broadcast session state

use std::sync::atomic::{AtomicBool, Ordering};

/// Whether the operator's next message should be broadcast
///
/// All transitions are single atomic operations, so two updates racing to
/// consume the session cannot both observe it armed.
#[derive(Debug, Default)]
pub struct BroadcastSession {
    armed: AtomicBool,
}

impl BroadcastSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the session; returns `true` if it was already armed
    pub fn arm(&self) -> bool {
        self.armed.swap(true, Ordering::SeqCst)
    }

    /// Disarm the session; returns `true` if it was armed
    pub fn disarm(&self) -> bool {
        self.armed.swap(false, Ordering::SeqCst)
    }

    /// Consume the armed state: disarms and reports whether it was armed
    pub fn take_armed(&self) -> bool {
        self.disarm()
    }

    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::SeqCst)
    }
}
