//! Async narration controller.
//!
//! A single actor task owns the [`Narrator`] and processes events one at a time
//! from an mpsc queue. Each `Speak` effect spawns exactly one synthesis future;
//! its outcome comes back through the same queue tagged with its ticket. A
//! `Cancel` effect aborts that future and asks the synthesizer to stop playing.
//!
//! Callers interact through a cloneable [`NarrationHandle`]; status snapshots
//! are published on a watch channel after every processed event.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::session::{
    ChunkTicket, CompletionOutcome, Effects, NarrationConfig, NarrationState, NarrationStatus,
    Narrator, SpeakRequest,
};
use crate::core::tts::{SpeechSynthesizer, TTSError};

#[derive(Debug, Error, PartialEq)]
pub enum NarrationError {
    #[error("Narration controller is not running")]
    ControllerClosed,
}

pub type NarrationResult<T> = Result<T, NarrationError>;

/// Controller settings beyond the session-level [`NarrationConfig`].
#[derive(Debug, Clone, Default)]
pub struct ControllerOptions {
    /// Treat a chunk that has not completed within this window as failed.
    /// `None` lets a stalled synthesis call stall the session.
    pub chunk_timeout: Option<Duration>,
}

enum Event {
    Toggle {
        text: String,
        reply: oneshot::Sender<NarrationStatus>,
    },
    Start {
        text: String,
        reply: oneshot::Sender<NarrationStatus>,
    },
    Pause {
        reply: oneshot::Sender<NarrationStatus>,
    },
    Stop {
        reply: oneshot::Sender<NarrationStatus>,
    },
    ChunkFinished(ChunkTicket),
    ChunkFailed(ChunkTicket, TTSError),
}

// =============================================================================
// Handle
// =============================================================================

/// Cloneable client of the narration actor.
#[derive(Clone)]
pub struct NarrationHandle {
    events: mpsc::UnboundedSender<Event>,
    status: watch::Receiver<NarrationStatus>,
    synthesizer_name: &'static str,
    synthesizer_info: Arc<serde_json::Value>,
}

impl NarrationHandle {
    /// Play/pause toggle for `text`; returns the status after the transition.
    pub async fn toggle(&self, text: impl Into<String>) -> NarrationResult<NarrationStatus> {
        let (reply, rx) = oneshot::channel();
        self.events
            .send(Event::Toggle {
                text: text.into(),
                reply,
            })
            .map_err(|_| NarrationError::ControllerClosed)?;
        rx.await.map_err(|_| NarrationError::ControllerClosed)
    }

    /// Narrate `text` from the beginning, replacing whatever is playing.
    pub async fn start(&self, text: impl Into<String>) -> NarrationResult<NarrationStatus> {
        let (reply, rx) = oneshot::channel();
        self.events
            .send(Event::Start {
                text: text.into(),
                reply,
            })
            .map_err(|_| NarrationError::ControllerClosed)?;
        rx.await.map_err(|_| NarrationError::ControllerClosed)
    }

    /// Pause if currently speaking; no-op otherwise.
    pub async fn pause(&self) -> NarrationResult<NarrationStatus> {
        let (reply, rx) = oneshot::channel();
        self.events
            .send(Event::Pause { reply })
            .map_err(|_| NarrationError::ControllerClosed)?;
        rx.await.map_err(|_| NarrationError::ControllerClosed)
    }

    /// Abandon the current session.
    pub async fn stop(&self) -> NarrationResult<NarrationStatus> {
        let (reply, rx) = oneshot::channel();
        self.events
            .send(Event::Stop { reply })
            .map_err(|_| NarrationError::ControllerClosed)?;
        rx.await.map_err(|_| NarrationError::ControllerClosed)
    }

    /// Latest published status.
    pub fn status(&self) -> NarrationStatus {
        self.status.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<NarrationStatus> {
        self.status.clone()
    }

    pub fn synthesizer_name(&self) -> &'static str {
        self.synthesizer_name
    }

    /// Provider details reported by the synthesizer at startup.
    pub fn synthesizer_info(&self) -> &serde_json::Value {
        &self.synthesizer_info
    }

    /// Wait until the published status satisfies `predicate`.
    pub async fn wait_for<F>(&self, mut predicate: F) -> NarrationResult<NarrationStatus>
    where
        F: FnMut(&NarrationStatus) -> bool,
    {
        let mut rx = self.status.clone();
        let status = rx
            .wait_for(|status| predicate(status))
            .await
            .map_err(|_| NarrationError::ControllerClosed)?;
        Ok(status.clone())
    }
}

// =============================================================================
// Controller
// =============================================================================

/// Spawns the narration actor.
pub struct NarrationController;

impl NarrationController {
    /// Start the actor on the current tokio runtime.
    ///
    /// The actor exits when `shutdown` is cancelled or every handle is dropped.
    pub fn spawn(
        config: NarrationConfig,
        options: ControllerOptions,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        shutdown: CancellationToken,
    ) -> NarrationHandle {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (status_tx, status_rx) = watch::channel(NarrationStatus::default());
        let synthesizer_name = synthesizer.name();
        let synthesizer_info = Arc::new(synthesizer.get_provider_info());

        let actor = NarrationActor {
            narrator: Narrator::new(config),
            synthesizer,
            completions: events_tx.downgrade(),
            in_flight: None,
            status: status_tx,
            chunk_timeout: options.chunk_timeout,
        };
        tokio::spawn(actor.run(events_rx, shutdown));

        NarrationHandle {
            events: events_tx,
            status: status_rx,
            synthesizer_name,
            synthesizer_info,
        }
    }
}

struct NarrationActor {
    narrator: Narrator,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    /// Weak so that the queue closes once every handle is gone.
    completions: mpsc::WeakUnboundedSender<Event>,
    in_flight: Option<(ChunkTicket, JoinHandle<()>)>,
    status: watch::Sender<NarrationStatus>,
    chunk_timeout: Option<Duration>,
}

impl NarrationActor {
    async fn run(mut self, mut events: mpsc::UnboundedReceiver<Event>, shutdown: CancellationToken) {
        info!(synthesizer = self.synthesizer.name(), "Narration controller started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                event = events.recv() => match event {
                    Some(event) => self.handle(event).await,
                    None => break,
                },
            }
        }

        let effects = self.narrator.stop();
        self.apply(effects).await;
        info!("Narration controller stopped");
    }

    async fn handle(&mut self, event: Event) {
        match event {
            Event::Toggle { text, reply } => {
                let effects = self.narrator.toggle(&text);
                self.apply(effects).await;
                let status = self.publish();
                info!(
                    session_id = ?status.session_id,
                    state = %status.state,
                    cursor = status.cursor,
                    total = status.total,
                    "Narration toggled"
                );
                let _ = reply.send(status);
            }
            Event::Start { text, reply } => {
                let effects = self.narrator.start(&text);
                self.apply(effects).await;
                let status = self.publish();
                info!(
                    session_id = ?status.session_id,
                    total = status.total,
                    chunks = status.chunks_total,
                    "Narration started"
                );
                let _ = reply.send(status);
            }
            Event::Pause { reply } => {
                let effects = self.narrator.pause();
                self.apply(effects).await;
                let _ = reply.send(self.publish());
            }
            Event::Stop { reply } => {
                let effects = self.narrator.stop();
                self.apply(effects).await;
                let status = self.publish();
                info!("Narration stopped");
                let _ = reply.send(status);
            }
            Event::ChunkFinished(ticket) => {
                self.clear_in_flight(&ticket);
                match self.narrator.chunk_finished(ticket) {
                    CompletionOutcome::Advanced(effects) => {
                        debug!(
                            session_id = %ticket.session,
                            chunk = ticket.index,
                            "Narration chunk finished"
                        );
                        self.apply(effects).await;
                        let status = self.publish();
                        if status.state == NarrationState::Completed {
                            info!(session_id = %ticket.session, "Narration completed");
                        }
                    }
                    CompletionOutcome::Stale => {
                        debug!(
                            session_id = %ticket.session,
                            call = ticket.call,
                            "Ignoring stale chunk completion"
                        );
                    }
                }
            }
            Event::ChunkFailed(ticket, error) => {
                self.clear_in_flight(&ticket);
                if self.narrator.chunk_failed(ticket) {
                    warn!(
                        session_id = %ticket.session,
                        chunk = ticket.index,
                        error = %error,
                        "Narration chunk failed, pausing session"
                    );
                    self.publish();
                } else {
                    debug!(session_id = %ticket.session, error = %error, "Ignoring stale chunk failure");
                }
            }
        }
    }

    async fn apply(&mut self, effects: Effects) {
        if effects.cancel.is_some() {
            if let Some((ticket, task)) = self.in_flight.take() {
                debug!(session_id = %ticket.session, chunk = ticket.index, "Cancelling in-flight chunk");
                task.abort();
            }
            self.synthesizer.pause().await;
        }

        if let Some(request) = effects.speak {
            self.spawn_chunk(request);
        }
    }

    fn spawn_chunk(&mut self, request: SpeakRequest) {
        let Some(completions) = self.completions.upgrade() else {
            return;
        };
        let synthesizer = self.synthesizer.clone();
        let chunk_timeout = self.chunk_timeout;
        let ticket = request.ticket;

        debug!(
            session_id = %ticket.session,
            chunk = ticket.index,
            start = ticket.start,
            end = ticket.end,
            "Issuing narration chunk"
        );

        let task = tokio::spawn(async move {
            let speak = synthesizer.speak(&request.text, &request.voice);
            let result = match chunk_timeout {
                Some(limit) => tokio::time::timeout(limit, speak)
                    .await
                    .unwrap_or_else(|_| {
                        Err(TTSError::Timeout(format!(
                            "chunk did not complete within {}ms",
                            limit.as_millis()
                        )))
                    }),
                None => speak.await,
            };
            let event = match result {
                Ok(()) => Event::ChunkFinished(request.ticket),
                Err(e) => Event::ChunkFailed(request.ticket, e),
            };
            let _ = completions.send(event);
        });

        self.in_flight = Some((ticket, task));
    }

    fn clear_in_flight(&mut self, ticket: &ChunkTicket) {
        if matches!(&self.in_flight, Some((current, _)) if current == ticket) {
            self.in_flight = None;
        }
    }

    fn publish(&self) -> NarrationStatus {
        let status = self.narrator.status();
        self.status.send_replace(status.clone());
        status
    }
}
