//! Typing Timing
//!
//! Intervals for the placeholder typewriter. Typing is slower than deleting,
//! which gives the usual typewriter feel.

use std::time::Duration;

/// Default delay between typed characters
pub const DEFAULT_TYPE_INTERVAL_MS: u64 = 65;

/// Default delay between deleted characters
pub const DEFAULT_DELETE_INTERVAL_MS: u64 = 35;

/// Timing parameters for the typewriter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingTiming {
    /// Delay between two typed characters (`T_type`)
    pub type_interval: Duration,
    /// Delay between two deleted characters (`T_delete`)
    pub delete_interval: Duration,
    /// Hold after a phrase is fully revealed, before the first deletion.
    /// Zero means the full phrase stays up for one `type_interval`.
    pub hold: Duration,
}

impl Default for TypingTiming {
    fn default() -> Self {
        Self {
            type_interval: Duration::from_millis(DEFAULT_TYPE_INTERVAL_MS),
            delete_interval: Duration::from_millis(DEFAULT_DELETE_INTERVAL_MS),
            hold: Duration::ZERO,
        }
    }
}

impl TypingTiming {
    /// Create timing with explicit intervals and no hold
    #[must_use]
    pub const fn new(type_interval: Duration, delete_interval: Duration) -> Self {
        Self {
            type_interval,
            delete_interval,
            hold: Duration::ZERO,
        }
    }

    /// Set the hold after a full reveal
    #[must_use]
    pub const fn with_hold(mut self, hold: Duration) -> Self {
        self.hold = hold;
        self
    }

    /// Delay before the first deletion of a fully typed phrase
    #[must_use]
    pub fn delay_after_full_reveal(&self) -> Duration {
        if self.hold.is_zero() {
            self.type_interval
        } else {
            self.hold
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_timing() {
        let timing = TypingTiming::default();
        assert_eq!(timing.type_interval, Duration::from_millis(65));
        assert_eq!(timing.delete_interval, Duration::from_millis(35));
        assert!(timing.hold.is_zero());
        assert!(timing.type_interval > timing.delete_interval);
    }

    #[test]
    fn test_delay_after_full_reveal() {
        let timing = TypingTiming::default();
        assert_eq!(timing.delay_after_full_reveal(), Duration::from_millis(65));
        assert!(timing.delay_after_full_reveal() > timing.delete_interval);

        let held = timing.with_hold(Duration::from_millis(800));
        assert_eq!(held.delay_after_full_reveal(), Duration::from_millis(800));
    }
}
