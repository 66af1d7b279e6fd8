//! Theme and Colors
//!
//! Search bar palette: a quiet base with one accent for the prompt and the
//! focused row.

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Palette
// ============================================================================

/// Accent - prompt marker and title
pub const ACCENT: Color = Color::Rgb(255, 140, 66);

/// Typed query text
pub const TEXT: Color = Color::Rgb(230, 230, 230);

/// Placeholder and hints
pub const DIM_GRAY: Color = Color::Rgb(110, 110, 110);

/// Focused preview row background
pub const FOCUS_BG: Color = Color::Rgb(60, 60, 80);

/// Image marker in the preview
pub const IMAGE_MARK: Color = Color::Rgb(130, 200, 230);

/// Navigation URL in the status line
pub const LINK_BLUE: Color = Color::Rgb(100, 180, 255);

// ============================================================================
// Styles
// ============================================================================

/// Title and prompt marker
#[must_use]
pub fn accent() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Typed query
#[must_use]
pub fn input() -> Style {
    Style::default().fg(TEXT)
}

/// Animated placeholder
#[must_use]
pub fn placeholder() -> Style {
    Style::default().fg(DIM_GRAY).add_modifier(Modifier::ITALIC)
}

/// Preview row, dimmed while a newer query loads
#[must_use]
pub fn preview_row(focused: bool, loading: bool) -> Style {
    let mut style = Style::default().fg(TEXT);
    if focused {
        style = style.bg(FOCUS_BG).add_modifier(Modifier::BOLD);
    }
    if loading {
        style = style.add_modifier(Modifier::DIM);
    }
    style
}

/// Status line
#[must_use]
pub fn status(navigated: bool) -> Style {
    if navigated {
        Style::default().fg(LINK_BLUE)
    } else {
        Style::default().fg(DIM_GRAY)
    }
}
