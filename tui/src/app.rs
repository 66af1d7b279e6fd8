//! Main Application
//!
//! The App manages the TUI lifecycle as a thin display client:
//! 1. Converts key presses to `SearchEvent`s (see [`keys`](crate::keys))
//! 2. Sends them to the embedded search bar via [`SearchBarClient`]
//! 3. Receives `SearchMessage`s and updates [`DisplayState`]
//! 4. Renders based on `DisplayState`
//!
//! There is no frame timer. The placeholder animation arrives as messages, so
//! the loop redraws whenever a key or a message comes in.

use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::layout::{Constraint, Layout, Position};
use ratatui::text::{Line, Span};
use ratatui::{Frame, Terminal};

use searchbar_core::SearchBarConfig;

use crate::client::SearchBarClient;
use crate::display::{DisplayNavigation, DisplayState};
use crate::keys::{handle_key, KeyOutcome};
use crate::theme;
use crate::widgets::{PreviewList, SearchInput};

/// Title row text
const TITLE: &str = "Search";

/// Main application state
pub struct App {
    /// Is the app still running?
    running: bool,
    /// Client for the embedded search bar
    client: SearchBarClient,
    /// Display state derived from `SearchMessage`s
    display: DisplayState,
}

impl App {
    /// Create an App talking to the endpoints in `config`
    ///
    /// Must be called inside a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: SearchBarConfig) -> anyhow::Result<Self> {
        Ok(Self::with_client(SearchBarClient::from_config(config)?))
    }

    /// Create an App around an existing client
    #[must_use]
    pub fn with_client(client: SearchBarClient) -> Self {
        Self {
            running: true,
            client,
            display: DisplayState::new(),
        }
    }

    /// Main event loop
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        let mut event_stream = EventStream::new();

        // Render initial frame immediately so user sees UI
        self.render(terminal)?;

        while self.running {
            tokio::select! {
                biased;

                // Terminal events - highest priority
                maybe_event = event_stream.next() => match maybe_event {
                    // Only handle Press events (not Release or Repeat)
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        let outcome = handle_key(&mut self.display, key);
                        self.apply_outcome(outcome).await?;
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => self.running = false,
                },

                maybe_msg = self.client.recv() => match maybe_msg {
                    Some(msg) => {
                        self.display.apply_message(msg);
                        self.process_messages();
                    }
                    None => {
                        tracing::warn!("Search bar stopped unexpectedly");
                        self.running = false;
                    }
                },
            }

            self.render(terminal)?;
        }

        self.client.shutdown().await
    }

    /// Apply every message already waiting
    fn process_messages(&mut self) {
        for msg in self.client.recv_all() {
            self.display.apply_message(msg);
        }
    }

    async fn apply_outcome(&mut self, outcome: KeyOutcome) -> anyhow::Result<()> {
        match outcome {
            KeyOutcome::Ignored | KeyOutcome::Redraw => Ok(()),
            KeyOutcome::Send(event) => self.client.send_event(event).await,
            KeyOutcome::Quit => {
                self.running = false;
                Ok(())
            }
        }
    }

    fn render<B: Backend>(&self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        terminal.draw(|frame| draw(frame, &self.display))?;
        Ok(())
    }

    /// Results page the user last navigated to
    #[must_use]
    pub fn last_navigation(&self) -> Option<&DisplayNavigation> {
        self.display.last_navigation.as_ref()
    }
}

/// Draw one frame of `display`
///
/// ```text
/// Search
/// > placeholder or query█
///   ▣ Preview record
///     Preview record
/// Enter search · ↑/↓ pick · Esc quit
/// ```
pub fn draw(frame: &mut Frame, display: &DisplayState) {
    let [title, input, preview, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(Line::from(Span::styled(TITLE, theme::accent())), title);

    let search = SearchInput::new(&display.query, &display.placeholder);
    let cursor = search.cursor_offset(input.width);
    frame.render_widget(search, input);
    frame.set_cursor_position(Position::new(input.x + cursor, input.y));

    if display.has_preview() {
        frame.render_widget(
            PreviewList::new(&display.preview)
                .focused(display.focused)
                .loading(display.loading),
            preview,
        );
    }

    frame.render_widget(
        Line::from(Span::styled(
            display.status(),
            theme::status(display.last_navigation.is_some()),
        )),
        status,
    );
}
