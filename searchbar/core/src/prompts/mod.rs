//! Prompt Source
//!
//! Fetches the phrases the placeholder animation cycles through. The list is
//! fetched once; a failure is logged and treated as an empty list, which
//! leaves the animator idle for the rest of the run. There is no retry.

mod answers;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub use answers::{parse_prompts, AnswersPromptSource};

/// Errors from the prompt endpoint
#[derive(Debug, Error)]
pub enum PromptError {
    /// Transport or body read failure
    #[error("prompt request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("prompt endpoint returned {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, possibly empty
        body: String,
    },

    /// Body did not have the expected shape
    #[error("malformed prompt response: {0}")]
    Decode(String),

    /// Configured endpoint does not form a valid URL
    #[error("invalid prompt endpoint URL: {0}")]
    InvalidUrl(String),
}

/// Ordered, immutable list of phrases
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptList(Arc<[String]>);

impl Default for PromptList {
    fn default() -> Self {
        Self(Arc::from(Vec::new()))
    }
}

impl PromptList {
    /// A list with nothing to type
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of phrases (including empty ones)
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no phrases at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Phrase at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    /// Iterate phrases in order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl From<Vec<String>> for PromptList {
    fn from(phrases: Vec<String>) -> Self {
        Self(phrases.into())
    }
}

impl FromIterator<String> for PromptList {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Source of placeholder phrases
///
/// Implement this trait to feed the animator from somewhere other than the
/// Answers autocomplete endpoint.
#[async_trait]
pub trait PromptSource: Send + Sync {
    /// Source name for logs
    fn name(&self) -> &str;

    /// Fetch the phrase list once
    async fn fetch_prompts(&self) -> Result<PromptList, PromptError>;
}

/// Fetch prompts, degrading any failure to an empty list
///
/// The error goes to the log only; the UI never sees it.
pub async fn load_prompts(source: &dyn PromptSource) -> PromptList {
    match source.fetch_prompts().await {
        Ok(prompts) => {
            tracing::info!(source = source.name(), count = prompts.len(), "Loaded prompts");
            prompts
        }
        Err(e) => {
            tracing::warn!(source = source.name(), error = %e, "Prompt fetch failed");
            PromptList::empty()
        }
    }
}
