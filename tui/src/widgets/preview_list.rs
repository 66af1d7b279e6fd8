//! PreviewList Widget
//!
//! The autocomplete dropdown: one row per preview record, an image marker
//! when the record has a picture, the focused row highlighted and every row
//! dimmed while a newer query is loading.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use searchbar_core::PreviewItem;

use crate::theme;

/// Drawn before labels that have a preview image
pub const IMAGE_MARKER: &str = "▣ ";

/// Drawn before labels without one
const NO_IMAGE: &str = "  ";

/// The preview dropdown
pub struct PreviewList<'a> {
    items: &'a [PreviewItem],
    focused: Option<usize>,
    loading: bool,
}

impl<'a> PreviewList<'a> {
    /// List of `items`
    #[must_use]
    pub fn new(items: &'a [PreviewItem]) -> Self {
        Self {
            items,
            focused: None,
            loading: false,
        }
    }

    /// Highlight row `focused`
    #[must_use]
    pub fn focused(mut self, focused: Option<usize>) -> Self {
        self.focused = focused;
        self
    }

    /// Dim every row
    #[must_use]
    pub fn loading(mut self, loading: bool) -> Self {
        self.loading = loading;
        self
    }
}

impl Widget for PreviewList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = self.items.iter().take(usize::from(area.height));
        for (y, (i, item)) in (area.y..).zip(rows.enumerate()) {
            let style = theme::preview_row(self.focused == Some(i), self.loading);
            buf.set_style(Rect::new(area.x, y, area.width, 1), style);

            let marker = if item.image_url.is_some() {
                IMAGE_MARKER
            } else {
                NO_IMAGE
            };
            let marker_style = if item.image_url.is_some() {
                style.fg(theme::IMAGE_MARK)
            } else {
                style
            };

            let (x, _) = buf.set_stringn(area.x, y, marker, usize::from(area.width), marker_style);
            let remaining = usize::from(area.right().saturating_sub(x));
            buf.set_stringn(x, y, &item.label, remaining, style);
        }
    }
}
