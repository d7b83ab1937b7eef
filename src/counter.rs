//! Sheep counter.

use std::time::{Duration, Instant};

/// How long the bounce animation runs after a tap.
pub const TAP_ANIMATION: Duration = Duration::from_millis(500);

/// Counts taps and remembers when the last one happened.
#[derive(Debug, Clone, Default)]
pub struct TapCounter {
    count: u64,
    last_tap: Option<Instant>,
}

impl TapCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one sheep. Returns the new total.
    pub fn tap(&mut self, now: Instant) -> u64 {
        self.count = self.count.saturating_add(1);
        self.last_tap = Some(now);
        self.count
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// True within [`TAP_ANIMATION`] of the last tap.
    pub fn is_animating(&self, now: Instant) -> bool {
        self.last_tap
            .is_some_and(|tap| now.saturating_duration_since(tap) < TAP_ANIMATION)
    }
}
