//! Broadcast result model

use serde::{Deserialize, Serialize};

/// Counters for one completed broadcast
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastOutcome {
    pub sent: usize,
    pub failed: usize,
    pub total: usize,
}

impl BroadcastOutcome {
    pub fn record_success(&mut self) {
        self.sent += 1;
        self.total += 1;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
        self.total += 1;
    }

    /// Report sent to the operator once the broadcast finishes
    pub fn report(&self) -> String {
        format!(
            "📢 Broadcast finished\n\n✅ Sent: {}\n❌ Failed: {}\n👥 Total: {}",
            self.sent, self.failed, self.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut outcome = BroadcastOutcome::default();
        outcome.record_success();
        outcome.record_failure();
        outcome.record_success();

        assert_eq!(outcome, BroadcastOutcome { sent: 2, failed: 1, total: 3 });
        assert!(outcome.report().contains("Sent: 2"));
        assert!(outcome.report().contains("Failed: 1"));
        assert!(outcome.report().contains("Total: 3"));
    }
}
