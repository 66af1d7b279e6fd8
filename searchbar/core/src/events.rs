//! Surface Events
//!
//! Events sent from a surface to the [`SearchBar`](crate::SearchBar). The
//! surface reports what the user did; it never decides what that means.

use serde::{Deserialize, Serialize};

/// Events from Surface to `SearchBar`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchEvent {
    // ============================================
    // Input Events
    // ============================================
    /// The input text changed (one per keystroke)
    QueryChanged {
        /// Full input text after the keystroke
        text: String,
    },

    /// User picked a record from the preview
    PreviewSelected {
        /// Label of the picked record
        label: String,
    },

    /// User submitted the input
    Submitted {
        /// Input text at submission
        query: String,
    },

    // ============================================
    // Lifecycle Events
    // ============================================
    /// The surface is going away
    Teardown,
}

impl SearchEvent {
    /// Event name for logs
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::QueryChanged { .. } => "query_changed",
            Self::PreviewSelected { .. } => "preview_selected",
            Self::Submitted { .. } => "submitted",
            Self::Teardown => "teardown",
        }
    }
}
