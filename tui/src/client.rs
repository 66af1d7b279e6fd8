//! Search Bar Client
//!
//! Thin wrapper around an embedded [`SearchBar`] for TUI integration. The
//! search bar runs its own loop in a spawned task; the client holds the two
//! channel ends the terminal needs.
//!
//! The TUI is a thin client with no search logic. Its job is:
//! 1. Convert key presses to `SearchEvent`s
//! 2. Send them to the `SearchBar`
//! 3. Receive `SearchMessage`s
//! 4. Render display state based on messages

use anyhow::{anyhow, Context};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use searchbar_core::{
    AnswersAutocomplete, AnswersPromptSource, AutocompleteBackend, PromptSource, SearchBar,
    SearchBarConfig, SearchEvent, SearchMessage,
};

/// Buffer for messages from the search bar
const MESSAGE_BUFFER: usize = 256;

/// Buffer for events to the search bar
const EVENT_BUFFER: usize = 64;

/// Client for communicating with the embedded search bar
pub struct SearchBarClient {
    /// Events to the search bar
    events: mpsc::Sender<SearchEvent>,
    /// Messages from the search bar
    rx: mpsc::Receiver<SearchMessage>,
    /// The search bar loop
    handle: Option<JoinHandle<()>>,
}

impl SearchBarClient {
    /// Start a search bar talking to the Answers endpoints in `config`
    ///
    /// Both collaborators share one HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: SearchBarConfig) -> anyhow::Result<Self> {
        let http_client = config
            .endpoint
            .http_client()
            .context("Failed to build HTTP client")?;

        let prompts = AnswersPromptSource::with_client(config.endpoint.clone(), http_client.clone());
        let backend = AnswersAutocomplete::with_client(
            config.endpoint.clone(),
            config.autocomplete.clone(),
            http_client,
        );

        Ok(Self::spawn(prompts, backend, config))
    }

    /// Start a search bar with the given collaborators
    ///
    /// Must be called inside a tokio runtime.
    pub fn spawn<P, A>(prompts: P, backend: A, config: SearchBarConfig) -> Self
    where
        P: PromptSource + 'static,
        A: AutocompleteBackend + 'static,
    {
        let (tx, rx) = mpsc::channel(MESSAGE_BUFFER);
        let (events, event_rx) = mpsc::channel(EVENT_BUFFER);

        let mut bar = SearchBar::new(prompts, backend, config, tx);
        let handle = tokio::spawn(async move {
            bar.run(event_rx).await;
        });

        Self {
            events,
            rx,
            handle: Some(handle),
        }
    }

    /// Report the new input text
    pub async fn query_changed(&self, text: String) -> anyhow::Result<()> {
        self.send_event(SearchEvent::QueryChanged { text }).await
    }

    /// Report a picked preview record
    pub async fn select_preview(&self, label: String) -> anyhow::Result<()> {
        self.send_event(SearchEvent::PreviewSelected { label }).await
    }

    /// Report a submitted query
    pub async fn submit(&self, query: String) -> anyhow::Result<()> {
        self.send_event(SearchEvent::Submitted { query }).await
    }

    /// Send a raw event to the search bar
    pub async fn send_event(&self, event: SearchEvent) -> anyhow::Result<()> {
        self.events
            .send(event)
            .await
            .map_err(|_| anyhow!("search bar is no longer running"))
    }

    /// Wait for the next message
    ///
    /// Returns `None` once the search bar has stopped and its buffer is drained.
    pub async fn recv(&mut self) -> Option<SearchMessage> {
        self.rx.recv().await
    }

    /// Receive all pending messages (non-blocking)
    pub fn recv_all(&mut self) -> Vec<SearchMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }

    /// Tear the search bar down and wait for its loop to finish
    ///
    /// Safe to call more than once.
    pub async fn shutdown(&mut self) -> anyhow::Result<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        // Already stopped if the send fails
        let _ = self.events.send(SearchEvent::Teardown).await;
        handle.await.context("Search bar task failed")?;
        tracing::debug!("Search bar client shut down");
        Ok(())
    }
}
