//! Widgets
//!
//! - [`SearchInput`]: the input line with its animated placeholder
//! - [`PreviewList`]: the autocomplete dropdown

mod preview_list;
mod search_input;

pub use preview_list::{PreviewList, IMAGE_MARKER};
pub use search_input::{SearchInput, PROMPT};

use unicode_width::UnicodeWidthChar;

/// Longest suffix of `text` that fits in `width` columns
fn tail_fitting(text: &str, width: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();
    for (i, c) in text.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = i;
    }
    &text[start..]
}
