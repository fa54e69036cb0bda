//! Debounced live suggestions.
//!
//! One pipeline drives one input field:
//!
//! ```text
//! Idle -> Scheduled -> Fetching -> Rendered | Cleared
//! ```
//!
//! Each keystroke restarts the quiet period, so at most one fetch is
//! scheduled at a time. Fetches already dispatched are never
//! cancelled; instead each carries a sequence number and only a
//! response newer than everything applied so far reaches the view.
//! Clearing (empty input, selection, dismissal) consumes a sequence
//! number too, so a late response cannot resurrect a cleared list.

use crate::core::api::CustomerApi;
use crate::core::error::Result;
use crate::core::types::{Customer, SuggestionItem};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{self, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Scheduled,
    Fetching,
    Rendered,
    Cleared,
}

/// What the dropdown currently shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionState {
    pub phase: Phase,
    pub items: Vec<SuggestionItem>,
    /// Input value the displayed items belong to
    pub query: Option<String>,
    /// Sequence number of the last applied update
    pub seq: u64,
    /// Inputs received so far
    pub input_rev: u64,
    /// Input revision the displayed list answers
    pub shown_rev: u64,
}

impl SuggestionState {
    fn initial() -> Self {
        Self {
            phase: Phase::Idle,
            items: Vec::new(),
            query: None,
            seq: 0,
            input_rev: 0,
            shown_rev: 0,
        }
    }

    /// Settled on the latest input, with nothing pending
    pub fn is_current(&self) -> bool {
        matches!(self.phase, Phase::Rendered | Phase::Cleared) && self.shown_rev == self.input_rev
    }
}

enum Command {
    Input(String),
    Select {
        index: usize,
        reply: oneshot::Sender<Option<String>>,
    },
    Dismiss,
}

struct FetchDone {
    seq: u64,
    rev: u64,
    query: String,
    result: Result<Vec<Customer>>,
}

/// Handle to a running suggestion pipeline.
///
/// Must be created inside a tokio runtime. Dropping the handle stops
/// the pipeline; in-flight fetches finish and are discarded.
pub struct SuggestionPipeline {
    command_tx: mpsc::UnboundedSender<Command>,
    state_rx: watch::Receiver<SuggestionState>,
}

impl SuggestionPipeline {
    pub fn start(api: Arc<dyn CustomerApi>, quiet_period: Duration) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SuggestionState::initial());

        tokio::spawn(run_loop(api, quiet_period, command_rx, state_tx));

        Self {
            command_tx,
            state_rx,
        }
    }

    /// Record the field's new value after a keystroke
    pub fn on_input(&self, text: impl Into<String>) {
        self.send(Command::Input(text.into()));
    }

    /// Pick the suggestion at `index`.
    ///
    /// Returns the value to write into the query field (name, else
    /// email, else first account number) and clears the list.
    pub async fn select(&self, index: usize) -> Option<String> {
        let (reply, rx) = oneshot::channel();
        self.send(Command::Select { index, reply });
        rx.await.ok().flatten()
    }

    /// Clear the field and the list
    pub fn dismiss(&self) {
        self.send(Command::Dismiss);
    }

    pub fn snapshot(&self) -> SuggestionState {
        self.state_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SuggestionState> {
        self.state_rx.clone()
    }

    fn send(&self, command: Command) {
        if self.command_tx.send(command).is_err() {
            tracing::warn!("Suggestion pipeline has stopped; input ignored");
        }
    }
}

async fn run_loop(
    api: Arc<dyn CustomerApi>,
    quiet_period: Duration,
    mut command_rx: mpsc::UnboundedReceiver<Command>,
    state_tx: watch::Sender<SuggestionState>,
) {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<FetchDone>();
    let mut pending: Option<String> = None;
    let mut deadline: Option<Instant> = None;
    let mut next_seq: u64 = 0;
    let mut latest_applied: u64 = 0;

    loop {
        let next_deadline = deadline;

        tokio::select! {
            command = command_rx.recv() => {
                let Some(command) = command else { break };
                match command {
                    Command::Input(text) => {
                        pending = Some(text);
                        deadline = Some(Instant::now() + quiet_period);
                        state_tx.send_modify(|s| {
                            s.phase = Phase::Scheduled;
                            s.input_rev += 1;
                        });
                    }
                    Command::Select { index, reply } => {
                        let value = state_tx
                            .borrow()
                            .items
                            .get(index)
                            .and_then(SuggestionItem::fill_value);
                        pending = None;
                        deadline = None;
                        next_seq += 1;
                        latest_applied = next_seq;
                        state_tx.send_modify(|s| clear(s, next_seq, value.clone()));
                        let _ = reply.send(value);
                    }
                    Command::Dismiss => {
                        pending = None;
                        deadline = None;
                        next_seq += 1;
                        latest_applied = next_seq;
                        state_tx.send_modify(|s| clear(s, next_seq, None));
                    }
                }
            }
            Some(done) = done_rx.recv() => {
                if done.seq <= latest_applied {
                    tracing::debug!(
                        "Discarding stale suggestions #{} (already showing #{})",
                        done.seq,
                        latest_applied
                    );
                    continue;
                }
                latest_applied = done.seq;
                let items = match done.result {
                    Ok(customers) => customers.iter().map(SuggestionItem::from).collect(),
                    Err(e) => {
                        tracing::warn!("Failed to fetch suggestions: {}", e);
                        Vec::new()
                    }
                };
                state_tx.send_modify(|s| {
                    s.phase = if items.is_empty() { Phase::Cleared } else { Phase::Rendered };
                    s.items = items;
                    s.query = Some(done.query);
                    s.seq = done.seq;
                    s.shown_rev = done.rev;
                });
            }
            () = async move {
                if let Some(at) = next_deadline {
                    time::sleep_until(at).await;
                }
            }, if next_deadline.is_some() => {
                deadline = None;
                let Some(text) = pending.take() else { continue };
                next_seq += 1;
                let seq = next_seq;
                let rev = state_tx.borrow().input_rev;

                if text.trim().is_empty() {
                    latest_applied = seq;
                    state_tx.send_modify(|s| clear(s, seq, Some(text)));
                    continue;
                }

                tracing::debug!("Fetching suggestions #{}", seq);
                state_tx.send_modify(|s| s.phase = Phase::Fetching);

                let api = Arc::clone(&api);
                let done_tx = done_tx.clone();
                tokio::spawn(async move {
                    let result = api.search_customers(&text, None).await;
                    let _ = done_tx.send(FetchDone { seq, rev, query: text, result });
                });
            }
        }
    }

    tracing::debug!("Suggestion pipeline stopped");
}

/// Clears answer every input received so far
fn clear(state: &mut SuggestionState, seq: u64, query: Option<String>) {
    state.phase = Phase::Cleared;
    state.items.clear();
    state.query = query;
    state.seq = seq;
    state.shown_rev = state.input_rev;
}
