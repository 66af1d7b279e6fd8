//! Key Mapping
//!
//! Turns key presses into local display edits and `SearchEvent`s.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use searchbar_core::SearchEvent;

use crate::display::DisplayState;

/// What the app should do after a key press
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Nothing changed
    Ignored,
    /// Only local state changed; redraw
    Redraw,
    /// Forward this event to the search bar
    Send(SearchEvent),
    /// Leave the app
    Quit,
}

/// Apply `key` to `display` and say what to do next
pub fn handle_key(display: &mut DisplayState, key: KeyEvent) -> KeyOutcome {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => KeyOutcome::Quit,
        KeyCode::Char('c') if ctrl => KeyOutcome::Quit,

        KeyCode::Enter => {
            if let Some(label) = display.focused_label() {
                KeyOutcome::Send(SearchEvent::PreviewSelected {
                    label: label.to_string(),
                })
            } else if display.query.trim().is_empty() {
                KeyOutcome::Ignored
            } else {
                KeyOutcome::Send(SearchEvent::Submitted {
                    query: display.query.clone(),
                })
            }
        }

        KeyCode::Char(c) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
            display.query.push(c);
            display.focused = None;
            query_changed(display)
        }
        KeyCode::Backspace => {
            if display.query.pop().is_some() {
                display.focused = None;
                query_changed(display)
            } else {
                KeyOutcome::Ignored
            }
        }

        KeyCode::Down => {
            display.focus_next();
            KeyOutcome::Redraw
        }
        KeyCode::Up => {
            display.focus_previous();
            KeyOutcome::Redraw
        }

        _ => KeyOutcome::Ignored,
    }
}

fn query_changed(display: &DisplayState) -> KeyOutcome {
    KeyOutcome::Send(SearchEvent::QueryChanged {
        text: display.query.clone(),
    })
}
