//! Debounce filter for accepted VSync edges.

use std::time::{Duration, Instant};

use crate::config::defaults;

/// Time-based debounce filter.
///
/// An edge is accepted when no edge has been accepted yet, or when at least
/// `threshold` has elapsed since the last accepted one. Rejected edges leave
/// the filter untouched, so a burst cannot push the window forward.
///
/// | Elapsed since last accepted | Result |
/// |-----------------------------|--------|
/// | none accepted yet | accept |
/// | `< threshold` | reject |
/// | `>= threshold` | accept, window restarts |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebounceFilter {
    threshold: Duration,
    last_accepted: Option<Instant>,
}

impl DebounceFilter {
    /// Creates a filter with the given minimum spacing.
    #[must_use]
    pub const fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            last_accepted: None,
        }
    }

    /// Returns the minimum spacing between accepted edges.
    #[must_use]
    pub const fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Returns when the last edge was accepted, if any.
    #[must_use]
    pub const fn last_accepted(&self) -> Option<Instant> {
        self.last_accepted
    }

    /// Offers an edge observed at `now`.
    ///
    /// Returns true and records `now` if the edge is accepted.
    pub fn accept(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_accepted {
            if now.saturating_duration_since(last) < self.threshold {
                return false;
            }
        }

        self.last_accepted = Some(now);
        true
    }
}

impl Default for DebounceFilter {
    /// Creates a filter with the 0.5 ms default threshold.
    fn default() -> Self {
        Self::new(defaults::pulse_threshold())
    }
}
