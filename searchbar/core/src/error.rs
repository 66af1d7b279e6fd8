//! Crate-level error type

use thiserror::Error;

use crate::autocomplete::AutocompleteError;
use crate::config::ConfigError;
use crate::navigation::NavigationError;
use crate::prompts::PromptError;

/// Any error the search bar can produce
#[derive(Debug, Error)]
pub enum SearchError {
    /// Configuration could not be loaded or validated
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Prompt fetch failed
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// Autocomplete fetch failed
    #[error(transparent)]
    Autocomplete(#[from] AutocompleteError),

    /// Results URL could not be built
    #[error(transparent)]
    Navigation(#[from] NavigationError),

    /// The surface stopped listening
    #[error("surface channel closed")]
    SurfaceClosed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversions_keep_message() {
        let err: SearchError = NavigationError::EmptyQuery.into();
        assert_eq!(err.to_string(), "query is empty");

        let err: SearchError = PromptError::Decode("bad".to_string()).into();
        assert!(matches!(err, SearchError::Prompt(_)));
        assert_eq!(err.to_string(), "malformed prompt response: bad");
    }
}
