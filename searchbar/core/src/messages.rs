//! Search Bar Messages
//!
//! Messages sent from the [`SearchBar`](crate::SearchBar) to a surface. The
//! surface renders exactly what it is told: it never animates the
//! placeholder itself and never decides which preview is current.

use serde::{Deserialize, Serialize};

use crate::autocomplete::{Preview, RequestId};

/// Messages from `SearchBar` to Surface
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchMessage {
    // ============================================
    // Placeholder
    // ============================================
    /// New placeholder text
    ///
    /// Only the typing animator produces this.
    Placeholder {
        /// Text to show while the input is empty
        text: String,
    },

    // ============================================
    // Preview
    // ============================================
    /// A newer query is in flight; dim the current preview
    PreviewLoading {
        /// Request being waited on
        request_id: RequestId,
    },

    /// Replace the preview (an empty preview hides the dropdown)
    Preview(Preview),

    /// Hide the preview because the input went blank
    PreviewCleared {
        /// Request id consumed by the clear
        request_id: RequestId,
    },

    // ============================================
    // Navigation
    // ============================================
    /// Open the full results page
    Navigate {
        /// Query being searched
        query: String,
        /// Results page URL
        url: String,
    },
}

impl SearchMessage {
    /// Placeholder text, if this is a placeholder write
    #[must_use]
    pub fn placeholder(&self) -> Option<&str> {
        match self {
            Self::Placeholder { text } => Some(text),
            _ => None,
        }
    }
}
