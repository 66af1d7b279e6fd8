//! Placeholder Animation
//!
//! The typing/deleting placeholder effect, split in three layers:
//!
//! - [`TypingTiming`]: the intervals (`T_type`, `T_delete`, hold)
//! - [`Typewriter`]: the pure state machine, one transition per tick
//! - [`TypingAnimator`]: owns the typewriter and its single pending timer
//!
//! ```text
//! PromptList ──load──▶ TypingAnimator ──fire(token)──▶ placeholder text
//!                         │    ▲
//!                         ▼    │
//!                     PendingTimer (deadline, token)
//! ```
//!
//! Nothing here sleeps. The animator only records when its next tick is due;
//! the owner of the event loop waits for that deadline.

mod animator;
mod timing;
mod typewriter;

pub use animator::{AnimatorSnapshot, PendingTimer, TimerToken, TypingAnimator};
pub use timing::{TypingTiming, DEFAULT_DELETE_INTERVAL_MS, DEFAULT_TYPE_INTERVAL_MS};
pub use typewriter::{Tick, Typewriter, TypingPhase};
