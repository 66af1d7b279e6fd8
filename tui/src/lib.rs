//! Searchbar TUI - Terminal surface for the search bar
//!
//! A full-screen terminal rendition of the retail search bar: an input line
//! whose placeholder types and deletes popular queries, and a live preview
//! of matching products under it.
//!
//! # Architecture
//!
//! - **Client**: embeds the headless `SearchBar` and owns its channels
//! - **Display**: state derived from `SearchMessage`s
//! - **Keys**: key presses to `SearchEvent`s
//! - **Widgets**: search input and preview list

pub mod app;
pub mod client;
pub mod display;
pub mod keys;
pub mod theme;
pub mod widgets;

pub use app::App;
