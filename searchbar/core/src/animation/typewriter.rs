//! Typewriter State Machine
//!
//! The pure transition function behind the placeholder animation. It knows
//! nothing about clocks: every call to [`Typewriter::advance`] is one timer
//! tick, and the returned [`Tick`] says what to show and how long to wait
//! before the next tick.
//!
//! ```text
//!  Typing(i, s) ──s == phrase──▶ PausedFull ──▶ Deleting(i, s)
//!      ▲                          (hold > 0)        │
//!      └────────── Deleting(i, "") ─ i = i+1 mod N ─┘
//! ```
//!
//! Reveal counts are in `char`s, so a prefix never splits a code point.

use std::time::Duration;

use super::timing::TypingTiming;
use crate::prompts::PromptList;

/// Observable phase of the placeholder animation
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TypingPhase {
    /// No prompts yet, nothing to type, or stopped
    #[default]
    Idle,
    /// Revealing the current phrase one character per tick
    Typing,
    /// Phrase fully revealed, holding before deleting
    PausedFull,
    /// Removing the current phrase one character per tick
    Deleting,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Typing,
    PausedFull,
    Deleting,
}

/// Result of one transition
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tick {
    /// Text to write into the placeholder
    pub placeholder: String,
    /// Delay until the next transition
    pub delay: Duration,
}

/// Typewriter over an immutable prompt list
#[derive(Clone, Debug)]
pub struct Typewriter {
    prompts: PromptList,
    index: usize,
    mode: Mode,
    revealed: usize,
}

impl Typewriter {
    /// Start typing the first non-empty phrase
    ///
    /// Returns `None` when the list holds nothing to type (empty, or only
    /// empty phrases); the animator then stays idle.
    #[must_use]
    pub fn new(prompts: PromptList) -> Option<Self> {
        let index = next_non_empty(&prompts, 0)?;
        Some(Self {
            prompts,
            index,
            mode: Mode::Typing,
            revealed: 0,
        })
    }

    /// Perform one transition
    pub fn advance(&mut self, timing: &TypingTiming) -> Tick {
        match self.mode {
            Mode::Typing => {
                self.revealed += 1;
                let placeholder = self.revealed_text().to_string();

                if self.revealed >= self.phrase_len() {
                    self.mode = if timing.hold.is_zero() {
                        Mode::Deleting
                    } else {
                        Mode::PausedFull
                    };
                    Tick {
                        placeholder,
                        delay: timing.delay_after_full_reveal(),
                    }
                } else {
                    Tick {
                        placeholder,
                        delay: timing.type_interval,
                    }
                }
            }
            Mode::PausedFull | Mode::Deleting => {
                self.revealed = self.revealed.saturating_sub(1);
                let placeholder = self.revealed_text().to_string();

                if self.revealed == 0 {
                    // The current phrase is non-empty, so the search always finds one.
                    let start = (self.index + 1) % self.prompts.len();
                    self.index = next_non_empty(&self.prompts, start).unwrap_or(self.index);
                    self.mode = Mode::Typing;
                    // The next phrase starts on the deleting cadence.
                    Tick {
                        placeholder,
                        delay: timing.delete_interval,
                    }
                } else {
                    self.mode = Mode::Deleting;
                    Tick {
                        placeholder,
                        delay: timing.delete_interval,
                    }
                }
            }
        }
    }

    /// Current phase
    #[must_use]
    pub fn phase(&self) -> TypingPhase {
        match self.mode {
            Mode::Typing => TypingPhase::Typing,
            Mode::PausedFull => TypingPhase::PausedFull,
            Mode::Deleting => TypingPhase::Deleting,
        }
    }

    /// Index of the phrase being animated
    #[must_use]
    pub fn phrase_index(&self) -> usize {
        self.index
    }

    /// Phrase being animated
    #[must_use]
    pub fn phrase(&self) -> &str {
        self.prompts.get(self.index).unwrap_or_default()
    }

    /// Currently revealed prefix of the phrase
    #[must_use]
    pub fn revealed_text(&self) -> &str {
        let phrase = self.phrase();
        match phrase.char_indices().nth(self.revealed) {
            Some((end, _)) => &phrase[..end],
            None => phrase,
        }
    }

    /// Number of revealed characters
    #[must_use]
    pub fn revealed_len(&self) -> usize {
        self.revealed
    }

    /// The prompt list being cycled
    #[must_use]
    pub fn prompts(&self) -> &PromptList {
        &self.prompts
    }

    fn phrase_len(&self) -> usize {
        self.phrase().chars().count()
    }
}

/// First index at or after `start` (wrapping) holding a non-empty phrase
fn next_non_empty(prompts: &PromptList, start: usize) -> Option<usize> {
    let len = prompts.len();
    (0..len)
        .map(|offset| (start + offset) % len)
        .find(|&i| prompts.get(i).is_some_and(|p| !p.is_empty()))
}
