//! Autocomplete Backend Traits
//!
//! Trait and record types for the search service behind the preview
//! dropdown. The pipeline treats the backend as a black box that turns a
//! query into ranked per-vertical results.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Monotonic identifier of an autocomplete request
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One keystroke's query
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SuggestionQuery {
    /// Text typed so far
    pub text: String,
    /// Identifier used to drop stale responses
    pub request_id: RequestId,
}

/// One ranked record returned by the backend
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResult {
    /// Display name
    pub label: String,
    /// Preview image, if the record has one
    pub preview_image_url: Option<String>,
}

impl SuggestionResult {
    /// Record without an image
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            preview_image_url: None,
        }
    }

    /// Attach a preview image
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.preview_image_url = Some(url.into());
        self
    }
}

/// Ranked results of one vertical
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerticalResults {
    /// Vertical key (e.g. "products")
    pub vertical: String,
    /// Results in rank order
    pub results: Vec<SuggestionResult>,
}

impl VerticalResults {
    /// Group results under a vertical
    pub fn new(vertical: impl Into<String>, results: Vec<SuggestionResult>) -> Self {
        Self {
            vertical: vertical.into(),
            results,
        }
    }
}

/// Errors from an autocomplete backend
#[derive(Debug, Error)]
pub enum AutocompleteError {
    /// Transport or body read failure
    #[error("autocomplete request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("autocomplete endpoint returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// Body did not have the expected shape
    #[error("malformed autocomplete response: {0}")]
    Decode(String),

    /// Configured endpoint does not form a valid URL
    #[error("invalid autocomplete endpoint URL: {0}")]
    InvalidUrl(String),
}

/// Autocomplete backend trait
///
/// Implement this trait to preview results from another search service.
#[async_trait]
pub trait AutocompleteBackend: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &str;

    /// Run one query
    ///
    /// Implementations must not assume they will be awaited to completion in
    /// order; the pipeline discards whatever is no longer current.
    async fn query(&self, query: &SuggestionQuery) -> Result<Vec<VerticalResults>, AutocompleteError>;
}
