//! Searchbar Core - Headless Search Bar Logic
//!
//! This crate provides the logic behind a retail search bar, completely
//! independent of any UI framework. A surface (the terminal UI, a test
//! harness, anything that can read a channel) renders what the core tells it
//! and forwards what the user does.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          Surface                             │
//! │      input line · animated placeholder · preview dropdown    │
//! └───────────────┬──────────────────────────────▲───────────────┘
//!                 │ SearchEvent (up)             │ SearchMessage (down)
//! ┌───────────────▼──────────────────────────────┴───────────────┐
//! │                         SearchBar                            │
//! │  ┌──────────────┐  ┌────────────────┐  ┌──────────────────┐  │
//! │  │ PromptSource │─▶│ TypingAnimator │  │ Autocomplete     │  │
//! │  │ (one fetch)  │  │ (one timer)    │  │ Pipeline         │  │
//! │  └──────────────┘  └────────────────┘  └──────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`SearchBar`]: single owner of all state, runs the event loop
//! - [`TypingAnimator`]: placeholder typing/deleting state machine with one pending timer
//! - [`AutocompletePipeline`]: request id bookkeeping, last request wins
//! - [`PromptSource`] / [`AutocompleteBackend`]: remote collaborators
//! - [`SearchEvent`] / [`SearchMessage`]: the surface protocol
//!
//! # Module Overview
//!
//! - [`animation`]: typewriter state machine, timing and timer ownership
//! - [`autocomplete`]: backend trait, Answers implementation, preview pipeline
//! - [`config`]: TOML / environment / CLI configuration
//! - [`controller`]: the `SearchBar` coordinator
//! - [`events`]: events from the surface
//! - [`messages`]: messages to the surface
//! - [`navigation`]: full search-results URLs
//! - [`prompts`]: prompt phrase source
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod animation;
pub mod autocomplete;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod messages;
pub mod navigation;
pub mod prompts;

// Re-exports for convenience
pub use animation::{
    AnimatorSnapshot, PendingTimer, Tick, TimerToken, TypingAnimator, TypingPhase, TypingTiming,
    Typewriter,
};
pub use autocomplete::{
    AnswersAutocomplete, AutocompleteBackend, AutocompleteError, AutocompletePipeline,
    AutocompleteSettings, Preview, PreviewItem, RequestId, Resolution, SuggestionQuery,
    SuggestionResult, VerticalResults,
};
pub use config::{
    default_config_path, load_config, load_config_from_path, ConfigError, ConfigOverrides,
    ConfigSource, EndpointConfig, SearchBarConfig, SearchBarToml,
};
pub use controller::SearchBar;
pub use error::SearchError;
pub use events::SearchEvent;
pub use messages::SearchMessage;
pub use navigation::{NavigationConfig, NavigationError};
pub use prompts::{load_prompts, AnswersPromptSource, PromptError, PromptList, PromptSource};
