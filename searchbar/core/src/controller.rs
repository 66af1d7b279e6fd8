//! `SearchBar` - The Coordinator
//!
//! Single owner of all search bar state: the typing animator, the
//! autocomplete pipeline and the channels back to the surface. Network work
//! runs in spawned tasks that own nothing but their request and report back
//! through channels, so every completion is just another event in the loop.
//!
//! ```text
//!   SearchEvent ──▶ ┌────────────────────────────────────┐ ──▶ SearchMessage
//!                   │ SearchBar::run (tokio::select!)     │
//!   timer deadline ▶│  handle_event · on_timer            │
//!   prompt oneshot ▶│  on_prompts   · on_completion       │
//!   completions   ─▶└────────────────────────────────────┘
//! ```
//!
//! Drive it with [`SearchBar::run`], or call the handlers step by step (tests
//! do this with a paused clock).

use std::future::pending;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::time::{sleep_until, Instant};

use crate::animation::{PendingTimer, TimerToken, TypingAnimator};
use crate::autocomplete::{
    AutocompleteBackend, AutocompleteError, AutocompletePipeline, RequestId, Resolution,
    VerticalResults,
};
use crate::config::SearchBarConfig;
use crate::error::SearchError;
use crate::events::SearchEvent;
use crate::messages::SearchMessage;
use crate::navigation::NavigationError;
use crate::prompts::{load_prompts, PromptList, PromptSource};

type Completion = (RequestId, Result<Vec<VerticalResults>, AutocompleteError>);

/// The search bar coordinator
pub struct SearchBar<P, A> {
    prompt_source: Arc<P>,
    backend: Arc<A>,
    config: SearchBarConfig,
    /// Channel to the surface
    tx: mpsc::Sender<SearchMessage>,
    animator: TypingAnimator,
    pipeline: AutocompletePipeline,
    /// Result of the one prompt fetch; dropped on teardown
    prompt_rx: Option<oneshot::Receiver<PromptList>>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
    placeholder: String,
    started: bool,
    torn_down: bool,
}

impl<P, A> SearchBar<P, A>
where
    P: PromptSource + 'static,
    A: AutocompleteBackend + 'static,
{
    /// Create a search bar that reports to `tx`
    pub fn new(
        prompt_source: P,
        backend: A,
        config: SearchBarConfig,
        tx: mpsc::Sender<SearchMessage>,
    ) -> Self {
        let animator = TypingAnimator::new(config.typing);
        let pipeline = AutocompletePipeline::new(config.autocomplete.clone());
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();

        Self {
            prompt_source: Arc::new(prompt_source),
            backend: Arc::new(backend),
            config,
            tx,
            animator,
            pipeline,
            prompt_rx: None,
            completion_tx,
            completion_rx,
            placeholder: String::new(),
            started: false,
            torn_down: false,
        }
    }

    /// Kick off the single prompt fetch
    ///
    /// Must be called inside a tokio runtime. Calling it again is a no-op.
    pub fn start(&mut self) {
        if self.started || self.torn_down {
            return;
        }
        self.started = true;

        let (tx, rx) = oneshot::channel();
        self.prompt_rx = Some(rx);
        let source = Arc::clone(&self.prompt_source);
        tracing::debug!(source = source.name(), "Fetching prompts");

        tokio::spawn(async move {
            let prompts = load_prompts(&*source).await;
            // Receiver is gone after teardown
            let _ = tx.send(prompts);
        });
    }

    /// Handle an event from the surface
    ///
    /// # Errors
    ///
    /// [`SearchError::SurfaceClosed`] when the surface stopped listening, or
    /// [`SearchError::Navigation`] when the results URL cannot be built.
    pub async fn handle_event(&mut self, event: SearchEvent) -> Result<(), SearchError> {
        if self.torn_down {
            tracing::debug!(kind = event.kind(), "Event after teardown ignored");
            return Ok(());
        }

        match event {
            SearchEvent::QueryChanged { text } => self.query_changed(&text).await,
            SearchEvent::PreviewSelected { label } => self.navigate(&label).await,
            SearchEvent::Submitted { query } => self.navigate(&query).await,
            SearchEvent::Teardown => {
                self.teardown();
                Ok(())
            }
        }
    }

    /// The prompt fetch finished
    ///
    /// A failed fetch arrives here as an empty list, which leaves the
    /// animator idle for good; it is never retried.
    pub fn on_prompts(&mut self, prompts: PromptList) {
        self.prompt_rx = None;
        if self.torn_down {
            tracing::debug!("Prompt result after teardown ignored");
            return;
        }

        if !self.animator.load(prompts, Instant::now()) {
            tracing::debug!("Nothing to type, placeholder stays empty");
        }
    }

    /// The pending animation tick is due
    ///
    /// # Errors
    ///
    /// [`SearchError::SurfaceClosed`] when the surface stopped listening.
    pub async fn on_timer(&mut self, token: TimerToken) -> Result<(), SearchError> {
        match self.animator.fire(token, Instant::now()) {
            Some(text) => {
                self.placeholder.clone_from(&text);
                self.send(SearchMessage::Placeholder { text }).await
            }
            None => Ok(()),
        }
    }

    /// An autocomplete fetch finished
    ///
    /// # Errors
    ///
    /// [`SearchError::SurfaceClosed`] when the surface stopped listening.
    pub async fn on_completion(
        &mut self,
        id: RequestId,
        result: Result<Vec<VerticalResults>, AutocompleteError>,
    ) -> Result<(), SearchError> {
        match self.pipeline.resolve(id, result) {
            Resolution::Render(preview) => {
                tracing::debug!(request_id = %id, items = preview.items.len(), "Rendering preview");
                self.send(SearchMessage::Preview(preview)).await
            }
            Resolution::Stale => Ok(()),
        }
    }

    /// Tear down: cancel the timer and ignore anything still in flight
    ///
    /// Idempotent. In-flight requests are not aborted; their results are
    /// simply never applied.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;

        let animation = self.animator.snapshot();
        let request_in_flight = self.pipeline.is_loading();
        self.animator.stop();
        self.prompt_rx = None;
        self.pipeline.close();
        tracing::info!(
            phase = ?animation.phase,
            phrase_index = animation.phrase_index,
            timer_cancelled = animation.timer_pending,
            latest_request = %self.pipeline.latest_issued(),
            request_in_flight,
            "Search bar torn down"
        );
    }

    /// Run until teardown, until `events` closes, or until the surface stops listening
    pub async fn run(&mut self, mut events: mpsc::Receiver<SearchEvent>) {
        self.start();

        while !self.torn_down {
            let timer = self.animator.pending();

            let outcome = tokio::select! {
                biased;

                event = events.recv() => match event {
                    Some(event) => self.handle_event(event).await,
                    None => {
                        tracing::debug!("Event channel closed");
                        self.teardown();
                        Ok(())
                    }
                },

                Some((id, result)) = self.completion_rx.recv() => {
                    self.on_completion(id, result).await
                }

                prompts = recv_prompts(&mut self.prompt_rx) => {
                    match prompts {
                        Some(prompts) => self.on_prompts(prompts),
                        None => {
                            tracing::warn!("Prompt fetch ended without a result");
                            self.prompt_rx = None;
                        }
                    }
                    Ok(())
                }

                token = timer_due(timer) => self.on_timer(token).await,

                () = self.tx.closed() => Err(SearchError::SurfaceClosed),
            };

            match outcome {
                Ok(()) => {}
                Err(SearchError::SurfaceClosed) => {
                    tracing::debug!("Surface stopped listening");
                    self.teardown();
                }
                Err(e) => tracing::warn!(error = %e, "Search bar operation failed"),
            }
        }
    }

    /// Current placeholder text
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// The typing animator
    #[must_use]
    pub fn animator(&self) -> &TypingAnimator {
        &self.animator
    }

    /// The autocomplete pipeline
    #[must_use]
    pub fn pipeline(&self) -> &AutocompletePipeline {
        &self.pipeline
    }

    /// Configuration in use
    #[must_use]
    pub fn config(&self) -> &SearchBarConfig {
        &self.config
    }

    /// Whether [`teardown`](Self::teardown) ran
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    async fn query_changed(&mut self, text: &str) -> Result<(), SearchError> {
        if text.trim().is_empty() {
            let request_id = self.pipeline.clear();
            tracing::debug!(%request_id, "Query blank, preview cleared");
            return self.send(SearchMessage::PreviewCleared { request_id }).await;
        }

        let query = self.pipeline.issue(text);
        let request_id = query.request_id;

        let backend = Arc::clone(&self.backend);
        let completions = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = backend.query(&query).await;
            let _ = completions.send((query.request_id, result));
        });

        self.send(SearchMessage::PreviewLoading { request_id }).await
    }

    async fn navigate(&mut self, query: &str) -> Result<(), SearchError> {
        match self.config.navigation.results_url_for(query) {
            Ok(url) => {
                tracing::info!(%url, "Navigating to results");
                self.send(SearchMessage::Navigate {
                    query: query.trim().to_string(),
                    url: url.to_string(),
                })
                .await
            }
            Err(NavigationError::EmptyQuery) => {
                tracing::debug!("Blank query, nothing to navigate to");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn send(&self, msg: SearchMessage) -> Result<(), SearchError> {
        self.tx
            .send(msg)
            .await
            .map_err(|_| SearchError::SurfaceClosed)
    }
}

async fn recv_prompts(rx: &mut Option<oneshot::Receiver<PromptList>>) -> Option<PromptList> {
    match rx {
        Some(rx) => rx.await.ok(),
        None => pending().await,
    }
}

async fn timer_due(timer: Option<PendingTimer>) -> TimerToken {
    match timer {
        Some(timer) => {
            sleep_until(timer.deadline).await;
            timer.token
        }
        None => pending().await,
    }
}
