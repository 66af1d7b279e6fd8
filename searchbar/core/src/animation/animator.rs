//! Typing Animator
//!
//! Owns the typewriter and the one timer that may advance it. The timer is
//! not a running task: it is a deadline plus a token, and whoever drives the
//! animator (the [`SearchBar`](crate::SearchBar) loop, or a test with a
//! virtual clock) calls [`TypingAnimator::fire`] with that token once the
//! deadline has passed.
//!
//! # Invariants
//!
//! - At most one [`PendingTimer`] exists at any time (`Option`), and only its
//!   token can mutate the animation.
//! - Every successful `fire` arms exactly one new timer.
//! - After [`TypingAnimator::stop`] no token is accepted again, so a callback
//!   that fires late is a no-op.

use std::time::Duration;

use tokio::time::Instant;

use super::timing::TypingTiming;
use super::typewriter::{TypingPhase, Typewriter};
use crate::prompts::PromptList;

/// Identifies one scheduled tick
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerToken {
    generation: u64,
}

impl TimerToken {
    /// Generation number of the tick
    #[must_use]
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// The single outstanding tick of an animator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingTimer {
    /// Token to present when the tick fires
    pub token: TimerToken,
    /// When the tick is due
    pub deadline: Instant,
}

/// Point-in-time view of the animator
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnimatorSnapshot {
    /// Current phase
    pub phase: TypingPhase,
    /// Index of the phrase being animated (0 while idle)
    pub phrase_index: usize,
    /// Currently revealed prefix
    pub revealed: String,
    /// Whether a tick is scheduled
    pub timer_pending: bool,
}

/// Placeholder typing animator
#[derive(Debug)]
pub struct TypingAnimator {
    timing: TypingTiming,
    writer: Option<Typewriter>,
    pending: Option<PendingTimer>,
    generation: u64,
    loaded: bool,
    live: bool,
}

impl TypingAnimator {
    /// Create an idle animator
    #[must_use]
    pub fn new(timing: TypingTiming) -> Self {
        Self {
            timing,
            writer: None,
            pending: None,
            generation: 0,
            loaded: false,
            live: true,
        }
    }

    /// Hand the prompt list to the animator
    ///
    /// Starts typing the first phrase and arms the first tick one typing
    /// interval after `now`. Returns `false` (and schedules nothing) when the
    /// animator was stopped, already loaded, or the list has nothing to type.
    pub fn load(&mut self, prompts: PromptList, now: Instant) -> bool {
        if !self.live || self.loaded {
            tracing::debug!(live = self.live, "Ignoring prompt list");
            return false;
        }
        self.loaded = true;

        let count = prompts.len();
        match Typewriter::new(prompts) {
            Some(writer) => {
                self.writer = Some(writer);
                self.arm(now, self.timing.type_interval);
                tracing::debug!(count, "Typing animation started");
                true
            }
            None => {
                tracing::debug!(count, "No phrases to type, staying idle");
                false
            }
        }
    }

    /// Run the tick identified by `token`
    ///
    /// Returns the new placeholder text, or `None` when the token is stale
    /// (superseded, or the animator was stopped).
    pub fn fire(&mut self, token: TimerToken, now: Instant) -> Option<String> {
        if !self.live {
            tracing::debug!(generation = token.generation, "Tick after stop ignored");
            return None;
        }
        match self.pending {
            Some(pending) if pending.token == token => {}
            _ => {
                tracing::debug!(generation = token.generation, "Stale tick ignored");
                return None;
            }
        }
        self.pending = None;

        let writer = self.writer.as_mut()?;
        let tick = writer.advance(&self.timing);
        self.arm(now, tick.delay);
        Some(tick.placeholder)
    }

    /// Stop the animation and cancel the pending tick
    ///
    /// Idempotent. A stopped animator never writes again.
    pub fn stop(&mut self) {
        if self.live {
            tracing::debug!(pending = self.pending.is_some(), "Typing animator stopped");
        }
        self.live = false;
        self.pending = None;
        self.writer = None;
        self.generation += 1;
    }

    /// The outstanding tick, if any
    #[must_use]
    pub fn pending(&self) -> Option<PendingTimer> {
        self.pending
    }

    /// When the next tick is due
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.map(|p| p.deadline)
    }

    /// Whether the animator can still write
    #[must_use]
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Whether the animator has nothing to animate
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.writer.is_none()
    }

    /// Timing in use
    #[must_use]
    pub fn timing(&self) -> &TypingTiming {
        &self.timing
    }

    /// Point-in-time view for observers and tests
    #[must_use]
    pub fn snapshot(&self) -> AnimatorSnapshot {
        match self.writer {
            Some(ref writer) => AnimatorSnapshot {
                phase: writer.phase(),
                phrase_index: writer.phrase_index(),
                revealed: writer.revealed_text().to_string(),
                timer_pending: self.pending.is_some(),
            },
            None => AnimatorSnapshot {
                phase: TypingPhase::Idle,
                phrase_index: 0,
                revealed: String::new(),
                timer_pending: self.pending.is_some(),
            },
        }
    }

    /// Replace the pending tick; the previous token becomes stale
    fn arm(&mut self, now: Instant, delay: Duration) {
        self.generation += 1;
        self.pending = Some(PendingTimer {
            token: TimerToken {
                generation: self.generation,
            },
            deadline: now + delay,
        });
    }
}
