//! Search Results Navigation
//!
//! Builds the URL of the full results page for a submitted query or a picked
//! preview record. Opening it is the surface's business.

use reqwest::Url;
use thiserror::Error;

/// Default results page
pub const DEFAULT_RESULTS_URL: &str = "https://search.example.com/";

/// Errors building a results URL
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    /// Blank queries do not navigate
    #[error("query is empty")]
    EmptyQuery,

    /// Configured results page is not a URL
    #[error("invalid results URL {url}: {reason}")]
    InvalidUrl {
        /// Configured value
        url: String,
        /// Parser message
        reason: String,
    },
}

/// Where full search results live
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationConfig {
    /// Results page; the query goes in its `query` parameter
    pub results_url: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            results_url: DEFAULT_RESULTS_URL.to_string(),
        }
    }
}

impl NavigationConfig {
    /// Results page URL for `query`
    ///
    /// Parameters already present on the configured URL are kept.
    ///
    /// # Errors
    ///
    /// [`NavigationError::EmptyQuery`] for a blank query,
    /// [`NavigationError::InvalidUrl`] if `results_url` does not parse.
    pub fn results_url_for(&self, query: &str) -> Result<Url, NavigationError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(NavigationError::EmptyQuery);
        }

        let mut url = Url::parse(&self.results_url).map_err(|e| NavigationError::InvalidUrl {
            url: self.results_url.clone(),
            reason: e.to_string(),
        })?;
        url.query_pairs_mut().append_pair("query", query);
        Ok(url)
    }
}
