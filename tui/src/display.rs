//! Display State
//!
//! What the terminal shows, derived from `SearchMessage`s plus the local input
//! line. The search bar decides what is current; this state only mirrors it.
//! In particular the placeholder is never advanced here, only replaced when a
//! `Placeholder` message arrives.

use searchbar_core::{PreviewItem, RequestId, SearchMessage};

/// Default status line
pub const HINT: &str = "Enter search · ↑/↓ pick · Esc quit";

/// A results page the search bar asked us to open
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayNavigation {
    /// Query being searched
    pub query: String,
    /// Results page URL
    pub url: String,
}

/// Everything needed to render one frame
#[derive(Clone, Debug, Default)]
pub struct DisplayState {
    /// Text typed so far
    pub query: String,
    /// Animated placeholder, shown while the query is empty
    pub placeholder: String,
    /// Preview records in display order
    pub preview: Vec<PreviewItem>,
    /// Request the preview answers
    pub preview_request: Option<RequestId>,
    /// A newer query is in flight (preview is dimmed)
    pub loading: bool,
    /// Highlighted preview row
    pub focused: Option<usize>,
    /// Last navigation
    pub last_navigation: Option<DisplayNavigation>,
}

impl DisplayState {
    /// Create a new display state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a `SearchMessage` to update display state
    pub fn apply_message(&mut self, msg: SearchMessage) {
        match msg {
            SearchMessage::Placeholder { text } => self.placeholder = text,
            SearchMessage::PreviewLoading { .. } => self.loading = true,
            SearchMessage::Preview(preview) => {
                self.preview_request = Some(preview.request_id);
                self.preview = preview.items;
                self.loading = false;
                self.focused = None;
            }
            SearchMessage::PreviewCleared { request_id } => {
                self.preview_request = Some(request_id);
                self.preview.clear();
                self.loading = false;
                self.focused = None;
            }
            SearchMessage::Navigate { query, url } => {
                self.last_navigation = Some(DisplayNavigation { query, url });
            }
        }
    }

    /// Whether the placeholder should be drawn instead of the query
    #[must_use]
    pub fn shows_placeholder(&self) -> bool {
        self.query.is_empty()
    }

    /// Whether there is a preview to draw
    #[must_use]
    pub fn has_preview(&self) -> bool {
        !self.preview.is_empty()
    }

    /// Label of the highlighted row
    #[must_use]
    pub fn focused_label(&self) -> Option<&str> {
        self.focused
            .and_then(|i| self.preview.get(i))
            .map(|item| item.label.as_str())
    }

    /// Move the highlight down, stopping at the last row
    pub fn focus_next(&mut self) {
        if self.preview.is_empty() {
            return;
        }
        let last = self.preview.len() - 1;
        self.focused = Some(match self.focused {
            None => 0,
            Some(i) => (i + 1).min(last),
        });
    }

    /// Move the highlight up; moving above the first row returns to the input
    pub fn focus_previous(&mut self) {
        self.focused = match self.focused {
            None | Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }

    /// Status line text
    #[must_use]
    pub fn status(&self) -> String {
        match self.last_navigation {
            Some(ref nav) => format!("→ {}", nav.url),
            None => HINT.to_string(),
        }
    }
}
