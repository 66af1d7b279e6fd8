//! Integration tests for the search bar event loop
//!
//! Every test runs `SearchBar::run` on a paused tokio clock, with scripted
//! prompt and autocomplete collaborators whose latency is virtual time.
//! Tests cover:
//! - Placeholder typing sequence and timing
//! - Prompt fetch failure and empty prompt lists
//! - Last-request-wins autocomplete with out-of-order responses
//! - Blank queries clearing the preview
//! - Teardown with work still in flight

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout_at, Instant};

use searchbar_core::{
    AutocompleteBackend, AutocompleteError, PromptError, PromptList, PromptSource, RequestId,
    SearchBar, SearchBarConfig, SearchEvent, SearchMessage, SuggestionQuery, SuggestionResult,
    VerticalResults,
};

// =============================================================================
// Scripted collaborators
// =============================================================================

struct ScriptedPrompts {
    delay: Duration,
    result: Result<Vec<&'static str>, u16>,
}

impl ScriptedPrompts {
    fn ok(phrases: &[&'static str]) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Ok(phrases.to_vec()),
        }
    }

    fn failing(status: u16) -> Self {
        Self {
            delay: Duration::ZERO,
            result: Err(status),
        }
    }

    fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl PromptSource for ScriptedPrompts {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch_prompts(&self) -> Result<PromptList, PromptError> {
        sleep(self.delay).await;
        match &self.result {
            Ok(phrases) => Ok(phrases.iter().map(ToString::to_string).collect()),
            Err(status) => Err(PromptError::Status {
                status: *status,
                body: String::new(),
            }),
        }
    }
}

/// Answers each query text after a scripted delay with scripted product labels
#[derive(Default)]
struct ScriptedBackend {
    replies: HashMap<&'static str, (Duration, Vec<&'static str>)>,
}

impl ScriptedBackend {
    fn reply(mut self, text: &'static str, delay_ms: u64, labels: &[&'static str]) -> Self {
        self.replies
            .insert(text, (Duration::from_millis(delay_ms), labels.to_vec()));
        self
    }
}

#[async_trait]
impl AutocompleteBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn query(&self, query: &SuggestionQuery) -> Result<Vec<VerticalResults>, AutocompleteError> {
        let Some((delay, labels)) = self.replies.get(query.text.as_str()) else {
            return Err(AutocompleteError::Status {
                status: 404,
                body: query.text.clone(),
            });
        };
        sleep(*delay).await;
        Ok(vec![VerticalResults::new(
            "products",
            labels.iter().map(|l| SuggestionResult::new(*l)).collect(),
        )])
    }
}

// =============================================================================
// Harness
// =============================================================================

type Bar = SearchBar<ScriptedPrompts, ScriptedBackend>;

struct Harness {
    start: Instant,
    events: mpsc::Sender<SearchEvent>,
    messages: mpsc::Receiver<SearchMessage>,
    handle: JoinHandle<Bar>,
}

impl Harness {
    fn spawn(prompts: ScriptedPrompts, backend: ScriptedBackend) -> Self {
        let (msg_tx, messages) = mpsc::channel(256);
        let (events, event_rx) = mpsc::channel(64);
        let mut config = SearchBarConfig::default();
        config.navigation.results_url = "https://shop.example.com/".to_string();

        let start = Instant::now();
        let mut bar = SearchBar::new(prompts, backend, config, msg_tx);
        let handle = tokio::spawn(async move {
            bar.run(event_rx).await;
            bar
        });

        Self {
            start,
            events,
            messages,
            handle,
        }
    }

    async fn send(&self, event: SearchEvent) {
        self.events.send(event).await.unwrap();
    }

    async fn type_text(&self, text: &str) {
        self.send(SearchEvent::QueryChanged {
            text: text.to_string(),
        })
        .await;
    }

    /// Messages received within `window`, with their virtual arrival time
    async fn collect_for(&mut self, window: Duration) -> Vec<(u128, SearchMessage)> {
        let deadline = Instant::now() + window;
        let mut out = Vec::new();
        while let Ok(Some(msg)) = timeout_at(deadline, self.messages.recv()).await {
            out.push((self.start.elapsed().as_millis(), msg));
        }
        out
    }

    /// First `n` placeholder writes with their arrival times
    async fn placeholders(&mut self, n: usize) -> Vec<(u128, String)> {
        let mut out = Vec::new();
        while out.len() < n {
            match self.messages.recv().await {
                Some(SearchMessage::Placeholder { text }) => {
                    out.push((self.start.elapsed().as_millis(), text));
                }
                Some(_) => {}
                None => break,
            }
        }
        out
    }

    async fn finish(self) -> Bar {
        self.handle.await.unwrap()
    }
}

fn previews(messages: &[(u128, SearchMessage)]) -> Vec<(RequestId, Vec<String>)> {
    messages
        .iter()
        .filter_map(|(_, m)| match m {
            SearchMessage::Preview(p) => Some((
                p.request_id,
                p.items.iter().map(|i| i.label.clone()).collect(),
            )),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Placeholder animation
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_placeholder_types_and_deletes_on_schedule() {
    let mut h = Harness::spawn(
        ScriptedPrompts::ok(&["CSS3.", "HTML5."]),
        ScriptedBackend::default(),
    );

    let writes = h.placeholders(11).await;
    let (times, texts): (Vec<u128>, Vec<String>) = writes.into_iter().unzip();

    assert_eq!(
        texts,
        vec!["C", "CS", "CSS", "CSS3", "CSS3.", "CSS3", "CSS", "CS", "C", "", "H"]
    );
    assert_eq!(
        times,
        vec![65, 130, 195, 260, 325, 390, 425, 460, 495, 530, 565]
    );
}

#[tokio::test(start_paused = true)]
async fn test_cycle_visits_every_phrase_and_wraps() {
    let mut h = Harness::spawn(
        ScriptedPrompts::ok(&["ab", "c", "de"]),
        ScriptedBackend::default(),
    );

    // Full reveals happen once per phrase, in order, then wrap to the first.
    let mut reveals = Vec::new();
    for (_, text) in h.placeholders(40).await {
        if ["ab", "c", "de"].contains(&text.as_str()) && reveals.last() != Some(&text) {
            reveals.push(text);
        }
    }
    assert_eq!(&reveals[..4], &["ab", "c", "de", "ab"]);
}

#[tokio::test(start_paused = true)]
async fn test_prompts_arriving_late_start_animation_late() {
    let mut h = Harness::spawn(
        ScriptedPrompts::ok(&["go"]).after(Duration::from_millis(1000)),
        ScriptedBackend::default(),
    );

    let writes = h.placeholders(2).await;
    assert_eq!(writes, vec![(1065, "g".to_string()), (1130, "go".to_string())]);
}

#[tokio::test(start_paused = true)]
async fn test_prompt_failure_never_animates() {
    let mut h = Harness::spawn(ScriptedPrompts::failing(503), ScriptedBackend::default());

    let messages = h.collect_for(Duration::from_secs(10)).await;
    assert!(messages.is_empty());

    let bar = {
        h.send(SearchEvent::Teardown).await;
        h.finish().await
    };
    assert!(bar.animator().is_idle());
}

#[tokio::test(start_paused = true)]
async fn test_empty_and_blank_prompt_lists_stay_idle() {
    for phrases in [&[][..], &["", ""][..]] {
        let mut h = Harness::spawn(ScriptedPrompts::ok(phrases), ScriptedBackend::default());

        let messages = h.collect_for(Duration::from_secs(5)).await;
        assert!(messages.is_empty());

        h.send(SearchEvent::Teardown).await;
        let bar = h.finish().await;
        assert!(bar.animator().pending().is_none());
    }
}

// =============================================================================
// Autocomplete
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_slow_older_response_is_discarded() {
    let backend = ScriptedBackend::default()
        .reply("b", 300, &["Basket"])
        .reply("bo", 100, &["Bowl"]);
    let mut h = Harness::spawn(ScriptedPrompts::ok(&[]), backend);

    h.type_text("b").await;
    h.type_text("bo").await;

    let messages = h.collect_for(Duration::from_secs(1)).await;
    let loading: Vec<(u128, SearchMessage)> = messages
        .iter()
        .filter(|(_, m)| matches!(m, SearchMessage::PreviewLoading { .. }))
        .cloned()
        .collect();
    assert_eq!(
        loading,
        vec![
            (
                0,
                SearchMessage::PreviewLoading {
                    request_id: RequestId(1)
                }
            ),
            (
                0,
                SearchMessage::PreviewLoading {
                    request_id: RequestId(2)
                }
            ),
        ]
    );
    assert_eq!(
        previews(&messages),
        vec![(RequestId(2), vec!["Bowl".to_string()])]
    );
}

#[tokio::test(start_paused = true)]
async fn test_fast_older_response_renders_until_superseded() {
    let backend = ScriptedBackend::default()
        .reply("b", 50, &["Basket"])
        .reply("bo", 100, &["Bowl"]);
    let mut h = Harness::spawn(ScriptedPrompts::ok(&[]), backend);

    h.type_text("b").await;
    let first = h.collect_for(Duration::from_millis(75)).await;
    h.type_text("bo").await;
    let second = h.collect_for(Duration::from_secs(1)).await;

    assert_eq!(
        previews(&first),
        vec![(RequestId(1), vec!["Basket".to_string()])]
    );
    assert_eq!(
        previews(&second),
        vec![(RequestId(2), vec!["Bowl".to_string()])]
    );
}

#[tokio::test(start_paused = true)]
async fn test_only_latest_of_many_keystrokes_renders() {
    let mut backend = ScriptedBackend::default();
    for text in ["b", "bo", "boi", "boil", "boile", "boiler"] {
        backend = backend.reply(text, 400, &["Stale"]);
    }
    let backend = backend.reply("boil ", 50, &["Boiling Pot", "Boil Bag"]);
    let mut h = Harness::spawn(ScriptedPrompts::ok(&[]), backend);

    for text in ["b", "bo", "boi", "boil", "boile", "boiler", "boil "] {
        h.type_text(text).await;
    }

    let messages = h.collect_for(Duration::from_secs(2)).await;
    assert_eq!(
        previews(&messages),
        vec![(
            RequestId(7),
            vec!["Boiling Pot".to_string(), "Boil Bag".to_string()]
        )]
    );
}

#[tokio::test(start_paused = true)]
async fn test_results_capped_at_four() {
    let backend = ScriptedBackend::default().reply("pan", 10, &["a", "b", "c", "d", "e", "f"]);
    let mut h = Harness::spawn(ScriptedPrompts::ok(&[]), backend);

    h.type_text("pan").await;
    let messages = h.collect_for(Duration::from_secs(1)).await;

    assert_eq!(
        previews(&messages),
        vec![(
            RequestId(1),
            vec!["a", "b", "c", "d"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<String>>()
        )]
    );
}

#[tokio::test(start_paused = true)]
async fn test_backend_error_renders_empty_preview() {
    let mut h = Harness::spawn(ScriptedPrompts::ok(&[]), ScriptedBackend::default());

    h.type_text("unknown").await;
    let messages = h.collect_for(Duration::from_secs(1)).await;

    assert_eq!(previews(&messages), vec![(RequestId(1), Vec::<String>::new())]);
}

#[tokio::test(start_paused = true)]
async fn test_blank_query_clears_and_drops_in_flight() {
    let backend = ScriptedBackend::default().reply("pot", 100, &["Pot"]);
    let mut h = Harness::spawn(ScriptedPrompts::ok(&[]), backend);

    h.type_text("pot").await;
    h.type_text("   ").await;
    let messages = h.collect_for(Duration::from_secs(1)).await;

    assert!(messages.iter().any(|(_, m)| *m
        == SearchMessage::PreviewCleared {
            request_id: RequestId(2)
        }));
    assert!(previews(&messages).is_empty());
}

// =============================================================================
// Navigation
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_selection_navigates_to_results() {
    let mut h = Harness::spawn(ScriptedPrompts::ok(&[]), ScriptedBackend::default());

    h.send(SearchEvent::PreviewSelected {
        label: "Boiling Pot".to_string(),
    })
    .await;
    let messages = h.collect_for(Duration::from_millis(10)).await;

    assert_eq!(
        messages,
        vec![(
            0,
            SearchMessage::Navigate {
                query: "Boiling Pot".to_string(),
                url: "https://shop.example.com/?query=Boiling+Pot".to_string(),
            }
        )]
    );
}

// =============================================================================
// Teardown
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_teardown_mid_animation_stops_everything() {
    let backend = ScriptedBackend::default().reply("pot", 500, &["Pot"]);
    let mut h = Harness::spawn(ScriptedPrompts::ok(&["CSS3."]), backend);

    let writes = h.placeholders(2).await;
    assert_eq!(writes.len(), 2);

    h.type_text("pot").await;
    h.send(SearchEvent::Teardown).await;

    let late = h.collect_for(Duration::from_secs(2)).await;
    assert!(late
        .iter()
        .all(|(_, m)| matches!(m, SearchMessage::PreviewLoading { .. })));

    let bar = h.finish().await;
    assert!(bar.is_torn_down());
    assert!(!bar.animator().is_live());
    assert!(bar.animator().pending().is_none());
    assert!(bar.pipeline().is_closed());
}

#[tokio::test(start_paused = true)]
async fn test_teardown_before_prompts_arrive() {
    let mut h = Harness::spawn(
        ScriptedPrompts::ok(&["late"]).after(Duration::from_millis(500)),
        ScriptedBackend::default(),
    );

    h.send(SearchEvent::Teardown).await;
    let messages = h.collect_for(Duration::from_secs(2)).await;
    assert!(messages.is_empty());

    let bar = h.finish().await;
    assert!(bar.animator().is_idle());
}

#[tokio::test(start_paused = true)]
async fn test_closing_event_channel_tears_down() {
    let h = Harness::spawn(ScriptedPrompts::ok(&["CSS3."]), ScriptedBackend::default());
    let Harness {
        events,
        messages: _messages,
        handle,
        ..
    } = h;

    drop(events);
    let bar = handle.await.unwrap();
    assert!(bar.is_torn_down());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_surface_receiver_tears_down() {
    let h = Harness::spawn(ScriptedPrompts::ok(&["CSS3."]), ScriptedBackend::default());
    let Harness {
        events: _events,
        messages,
        handle,
        ..
    } = h;

    drop(messages);
    let bar = handle.await.unwrap();
    assert!(bar.is_torn_down());
}
