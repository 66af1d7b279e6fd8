//! Autocomplete Preview
//!
//! Live previews under the search input while the user types.
//!
//! - [`AutocompleteBackend`]: the search service (trait)
//! - [`AnswersAutocomplete`]: reqwest implementation against the Answers API
//! - [`AutocompletePipeline`]: request ids, filtering and capping
//!
//! ```text
//! keystroke ──issue──▶ SuggestionQuery(id) ──spawn──▶ backend.query()
//!                                                        │
//! Preview ◀──Render── resolve(id, result) ◀──────────────┘
//!          (Stale unless id is the latest issued)
//! ```

mod answers;
mod pipeline;
mod traits;

pub use answers::{parse_results, AnswersAutocomplete};
pub use pipeline::{
    AutocompletePipeline, AutocompleteSettings, Preview, PreviewItem, Resolution,
    DEFAULT_IMAGE_FIELD, DEFAULT_MAX_RESULTS, DEFAULT_VERTICAL,
};
pub use traits::{
    AutocompleteBackend, AutocompleteError, RequestId, SuggestionQuery, SuggestionResult,
    VerticalResults,
};
