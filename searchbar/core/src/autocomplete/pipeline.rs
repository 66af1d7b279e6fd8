//! Autocomplete Pipeline
//!
//! Request/response bookkeeping for the preview dropdown. Every keystroke is
//! issued with a fresh [`RequestId`]; nothing in flight is ever cancelled.
//! When a response arrives it renders only if its id is still the latest
//! issued, so the last request wins regardless of arrival order.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::traits::{AutocompleteError, RequestId, SuggestionQuery, VerticalResults};

/// Default vertical shown in the preview
pub const DEFAULT_VERTICAL: &str = "products";

/// Default number of preview records per vertical
pub const DEFAULT_MAX_RESULTS: usize = 4;

/// Default data field holding the preview image
pub const DEFAULT_IMAGE_FIELD: &str = "c_customPhoto";

/// Which verticals to preview and how many records of each
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AutocompleteSettings {
    /// Verticals in display order
    pub verticals: Vec<String>,
    /// Cap for verticals without their own limit
    pub max_results: usize,
    /// Per-vertical caps
    pub limits: HashMap<String, usize>,
    /// Data field read for the preview image
    pub image_field: String,
}

impl Default for AutocompleteSettings {
    fn default() -> Self {
        Self {
            verticals: vec![DEFAULT_VERTICAL.to_string()],
            max_results: DEFAULT_MAX_RESULTS,
            limits: HashMap::new(),
            image_field: DEFAULT_IMAGE_FIELD.to_string(),
        }
    }
}

impl AutocompleteSettings {
    /// Cap for `vertical`
    #[must_use]
    pub fn limit_for(&self, vertical: &str) -> usize {
        self.limits
            .get(vertical)
            .copied()
            .unwrap_or(self.max_results)
    }
}

/// One rendered preview record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewItem {
    /// Vertical the record came from
    pub vertical: String,
    /// Display label
    pub label: String,
    /// Image to show next to the label
    pub image_url: Option<String>,
}

/// Preview for one query
///
/// An empty `items` list means "render nothing".
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preview {
    /// Request the preview answers
    pub request_id: RequestId,
    /// Query text of that request
    pub query: String,
    /// Records in display order
    pub items: Vec<PreviewItem>,
}

impl Preview {
    /// Whether there is nothing to show
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Outcome of a completed request
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The response is current and should replace the preview
    Render(Preview),
    /// A newer request was issued (or the pipeline closed); drop it
    Stale,
}

/// Last-request-wins autocomplete bookkeeping
#[derive(Debug)]
pub struct AutocompletePipeline {
    settings: AutocompleteSettings,
    latest_issued: RequestId,
    /// Query text of `latest_issued`, `None` when it was a clear
    latest_text: Option<String>,
    last_rendered: Option<RequestId>,
    closed: bool,
}

impl AutocompletePipeline {
    /// Create a pipeline with nothing issued
    #[must_use]
    pub fn new(settings: AutocompleteSettings) -> Self {
        Self {
            settings,
            latest_issued: RequestId::default(),
            latest_text: None,
            last_rendered: None,
            closed: false,
        }
    }

    /// Issue a query for `text` with a fresh id
    ///
    /// Every earlier id becomes stale.
    pub fn issue(&mut self, text: &str) -> SuggestionQuery {
        let request_id = self.next_id();
        self.latest_text = Some(text.to_string());
        tracing::trace!(%request_id, "Issued autocomplete query");
        SuggestionQuery {
            text: text.to_string(),
            request_id,
        }
    }

    /// Supersede everything in flight without issuing a fetch
    ///
    /// Used when the query becomes blank. The returned id is marked rendered,
    /// since the cleared preview is its rendering.
    pub fn clear(&mut self) -> RequestId {
        let request_id = self.next_id();
        self.latest_text = None;
        self.last_rendered = Some(request_id);
        request_id
    }

    /// Settle the response to request `id`
    ///
    /// Errors and empty responses render an empty preview; the error is only
    /// logged.
    pub fn resolve(
        &mut self,
        id: RequestId,
        result: Result<Vec<VerticalResults>, AutocompleteError>,
    ) -> Resolution {
        if self.closed {
            tracing::debug!(request_id = %id, "Response after close ignored");
            return Resolution::Stale;
        }
        let query = match self.latest_text {
            Some(ref text) if id == self.latest_issued => text.clone(),
            _ => {
                tracing::debug!(
                    request_id = %id,
                    latest = %self.latest_issued,
                    "Stale autocomplete response discarded"
                );
                return Resolution::Stale;
            }
        };

        let items = match result {
            Ok(verticals) => self.preview_items(verticals),
            Err(e) => {
                tracing::warn!(request_id = %id, error = %e, "Autocomplete fetch failed");
                Vec::new()
            }
        };

        self.last_rendered = Some(id);
        Resolution::Render(Preview {
            request_id: id,
            query,
            items,
        })
    }

    /// Mark the pipeline closed; every later response is stale
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Whether [`close`](Self::close) was called
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Most recently issued id (`RequestId(0)` before the first keystroke)
    #[must_use]
    pub fn latest_issued(&self) -> RequestId {
        self.latest_issued
    }

    /// Id of the preview currently shown
    #[must_use]
    pub fn last_rendered(&self) -> Option<RequestId> {
        self.last_rendered
    }

    /// Whether the latest query is still waiting for its response
    #[must_use]
    pub fn is_loading(&self) -> bool {
        !self.closed
            && self.latest_text.is_some()
            && self.last_rendered != Some(self.latest_issued)
    }

    /// Settings in use
    #[must_use]
    pub fn settings(&self) -> &AutocompleteSettings {
        &self.settings
    }

    fn next_id(&mut self) -> RequestId {
        self.latest_issued = RequestId(self.latest_issued.0 + 1);
        self.latest_issued
    }

    /// Keep configured verticals in configured order, drop unlabeled records, cap each vertical
    fn preview_items(&self, verticals: Vec<VerticalResults>) -> Vec<PreviewItem> {
        let mut by_vertical: HashMap<String, VerticalResults> = verticals
            .into_iter()
            .map(|v| (v.vertical.clone(), v))
            .collect();

        let mut items = Vec::new();
        for vertical in &self.settings.verticals {
            let Some(found) = by_vertical.remove(vertical) else {
                continue;
            };
            items.extend(
                found
                    .results
                    .into_iter()
                    .filter(|r| !r.label.trim().is_empty())
                    .take(self.settings.limit_for(vertical))
                    .map(|r| PreviewItem {
                        vertical: vertical.clone(),
                        label: r.label,
                        image_url: r.preview_image_url,
                    }),
            );
        }
        items
    }
}
