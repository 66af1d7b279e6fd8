//! SearchInput Widget
//!
//! One line: a prompt marker, then either the typed query or, while the query
//! is empty, the animated placeholder.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use unicode_width::UnicodeWidthStr;

use super::tail_fitting;
use crate::theme;

/// Prompt marker drawn before the input
pub const PROMPT: &str = "> ";

/// The search input line
pub struct SearchInput<'a> {
    query: &'a str,
    placeholder: &'a str,
}

impl<'a> SearchInput<'a> {
    /// Input showing `query`, or `placeholder` while `query` is empty
    #[must_use]
    pub fn new(query: &'a str, placeholder: &'a str) -> Self {
        Self { query, placeholder }
    }

    /// Column of the cursor relative to the widget, for a widget `width` wide
    #[must_use]
    pub fn cursor_offset(&self, width: u16) -> u16 {
        let prompt = PROMPT.width();
        let available = usize::from(width).saturating_sub(prompt);
        let shown = tail_fitting(self.query, available.saturating_sub(1)).width();
        u16::try_from(prompt + shown).unwrap_or(width)
    }
}

impl Widget for SearchInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let (x, _) = buf.set_stringn(
            area.x,
            area.y,
            PROMPT,
            usize::from(area.width),
            theme::accent(),
        );
        let available = usize::from(area.right().saturating_sub(x));

        if self.query.is_empty() {
            buf.set_stringn(x, area.y, self.placeholder, available, theme::placeholder());
        } else {
            // Keep the end of a long query visible, leaving a column for the cursor
            let visible = tail_fitting(self.query, available.saturating_sub(1));
            buf.set_stringn(x, area.y, visible, available, theme::input());
        }
    }
}
