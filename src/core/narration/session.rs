//! Narration session state machine.
//!
//! [`Narrator`] is a pure value: it consumes events (`toggle`, chunk completion,
//! chunk failure, stop) and returns the [`Effects`] the caller must carry out.
//! It never performs IO, which keeps every transition deterministic and lets the
//! async controller stay a thin event loop around it.
//!
//! Every synthesis call is tagged with a [`ChunkTicket`]. A completion is only
//! applied when its ticket equals the live session's outstanding ticket, so late
//! notifications from paused or abandoned sessions are dropped.

use std::fmt;

use serde::Serialize;

use super::filter::strip_narration_noise;
use crate::core::tts::VoiceConfig;

/// Default number of characters handed to the synthesizer per call.
pub const DEFAULT_CHUNK_SIZE: usize = 1500;

// =============================================================================
// Identity and Tickets
// =============================================================================

/// Identity of one narration session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tag attached to an outstanding synthesis call.
///
/// `start` and `end` are char offsets into the filtered session text. `call`
/// is unique per issued call, so re-issuing a chunk after a pause yields a
/// ticket distinct from the interrupted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkTicket {
    pub session: SessionId,
    pub call: u64,
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

/// One synthesis call the caller must issue.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakRequest {
    pub ticket: ChunkTicket,
    pub text: String,
    pub voice: VoiceConfig,
}

/// Side effects produced by a transition.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effects {
    /// Outstanding call that must be cancelled (best effort).
    pub cancel: Option<ChunkTicket>,
    /// Next call to issue.
    pub speak: Option<SpeakRequest>,
}

impl Effects {
    fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.cancel.is_none() && self.speak.is_none()
    }
}

/// Result of feeding a chunk completion into the narrator.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionOutcome {
    /// The completion matched the outstanding call and the cursor advanced.
    Advanced(Effects),
    /// The completion belonged to a paused, replaced or stopped session.
    Stale,
}

// =============================================================================
// State
// =============================================================================

/// Play state exposed to the user interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrationState {
    #[default]
    Idle,
    Speaking,
    Paused,
    Completed,
}

impl NarrationState {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Speaking => "speaking",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for NarrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serialisable snapshot of the narration slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NarrationStatus {
    pub session_id: Option<SessionId>,
    pub state: NarrationState,
    /// Chars already spoken.
    pub cursor: usize,
    /// Chars in the filtered session text.
    pub total: usize,
    pub chunks_spoken: usize,
    pub chunks_total: usize,
}

/// Session-independent narration settings.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrationConfig {
    pub chunk_size: usize,
    pub voice: VoiceConfig,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            voice: VoiceConfig::default(),
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// One end-to-end narration attempt over a fixed source text.
#[derive(Debug, Clone)]
pub struct NarrationSession {
    id: SessionId,
    /// Text exactly as supplied by the caller, used for identity comparison.
    source_text: String,
    /// Filtered text, split into chars so chunk boundaries never cut a code point.
    chars: Vec<char>,
    cursor: usize,
    chunk_size: usize,
    state: NarrationState,
    voice: VoiceConfig,
    outstanding: Option<ChunkTicket>,
    chunks_spoken: usize,
    calls_issued: u64,
}

impl NarrationSession {
    fn new(id: SessionId, source_text: String, config: &NarrationConfig) -> Self {
        let chars = strip_narration_noise(&source_text).chars().collect();
        Self {
            id,
            source_text,
            chars,
            cursor: 0,
            chunk_size: config.chunk_size.max(1),
            state: NarrationState::Speaking,
            voice: config.voice.clone(),
            outstanding: None,
            chunks_spoken: 0,
            calls_issued: 0,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn state(&self) -> NarrationState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn outstanding(&self) -> Option<&ChunkTicket> {
        self.outstanding.as_ref()
    }

    fn chunks_total(&self) -> usize {
        self.chars.len().div_ceil(self.chunk_size)
    }

    /// Take the chunk at the cursor and tag it, or complete the session.
    fn emit_next_chunk(&mut self) -> Option<SpeakRequest> {
        if self.cursor >= self.chars.len() {
            self.cursor = self.chars.len();
            self.state = NarrationState::Completed;
            self.outstanding = None;
            return None;
        }

        let end = (self.cursor + self.chunk_size).min(self.chars.len());
        self.calls_issued += 1;
        let ticket = ChunkTicket {
            session: self.id,
            call: self.calls_issued,
            index: self.chunks_spoken,
            start: self.cursor,
            end,
        };
        self.outstanding = Some(ticket);
        Some(SpeakRequest {
            ticket,
            text: self.chars[self.cursor..end].iter().collect(),
            voice: self.voice.clone(),
        })
    }

    fn status(&self) -> NarrationStatus {
        NarrationStatus {
            session_id: Some(self.id),
            state: self.state,
            cursor: self.cursor,
            total: self.chars.len(),
            chunks_spoken: self.chunks_spoken,
            chunks_total: self.chunks_total(),
        }
    }
}

// =============================================================================
// Narrator
// =============================================================================

/// Owner of the single narration slot.
#[derive(Debug)]
pub struct Narrator {
    config: NarrationConfig,
    next_id: u64,
    session: Option<NarrationSession>,
}

impl Narrator {
    pub fn new(config: NarrationConfig) -> Self {
        Self {
            config,
            next_id: 1,
            session: None,
        }
    }

    pub fn config(&self) -> &NarrationConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&NarrationSession> {
        self.session.as_ref()
    }

    pub fn state(&self) -> NarrationState {
        self.session
            .as_ref()
            .map(NarrationSession::state)
            .unwrap_or_default()
    }

    pub fn status(&self) -> NarrationStatus {
        self.session
            .as_ref()
            .map(NarrationSession::status)
            .unwrap_or_default()
    }

    /// Play/pause toggle for `text`.
    ///
    /// Same text while speaking pauses, same text while paused resumes from the
    /// cursor. Anything else starts a fresh session that replaces the current one.
    pub fn toggle(&mut self, text: &str) -> Effects {
        if let Some(session) = self.session.as_mut()
            && session.source_text == text
        {
            let state = session.state;
            match state {
                NarrationState::Speaking => return self.pause(),
                NarrationState::Paused => {
                    session.state = NarrationState::Speaking;
                    return Effects {
                        cancel: None,
                        speak: session.emit_next_chunk(),
                    };
                }
                NarrationState::Idle | NarrationState::Completed => {}
            }
        }

        self.start(text)
    }

    /// Pause the speaking session; the outstanding call becomes stale.
    pub fn pause(&mut self) -> Effects {
        match self.session.as_mut() {
            Some(session) if session.state == NarrationState::Speaking => {
                session.state = NarrationState::Paused;
                Effects {
                    cancel: session.outstanding.take(),
                    speak: None,
                }
            }
            _ => Effects::none(),
        }
    }

    /// Apply a synthesis completion.
    pub fn chunk_finished(&mut self, ticket: ChunkTicket) -> CompletionOutcome {
        let Some(session) = self.session.as_mut() else {
            return CompletionOutcome::Stale;
        };
        if session.outstanding != Some(ticket) {
            return CompletionOutcome::Stale;
        }

        session.outstanding = None;
        session.cursor = ticket.end.min(session.chars.len());
        session.chunks_spoken += 1;

        let speak = if session.state == NarrationState::Speaking {
            session.emit_next_chunk()
        } else {
            None
        };
        CompletionOutcome::Advanced(Effects { cancel: None, speak })
    }

    /// Apply a synthesis failure: the session pauses on the failed chunk.
    ///
    /// Returns `false` when the ticket is stale.
    pub fn chunk_failed(&mut self, ticket: ChunkTicket) -> bool {
        match self.session.as_mut() {
            Some(session) if session.outstanding == Some(ticket) => {
                session.outstanding = None;
                session.state = NarrationState::Paused;
                true
            }
            _ => false,
        }
    }

    /// Abandon the current session and return to `Idle`.
    pub fn stop(&mut self) -> Effects {
        match self.session.take() {
            Some(mut session) => Effects {
                cancel: session.outstanding.take(),
                speak: None,
            },
            None => Effects::none(),
        }
    }

    /// Start narrating `text` from the beginning, replacing any current session.
    pub fn start(&mut self, text: &str) -> Effects {
        let cancel = self
            .session
            .take()
            .and_then(|mut previous| previous.outstanding.take());

        let id = SessionId(self.next_id);
        self.next_id += 1;

        let mut session = NarrationSession::new(id, text.to_string(), &self.config);
        let speak = session.emit_next_chunk();
        self.session = Some(session);

        Effects { cancel, speak }
    }
}

impl Default for Narrator {
    fn default() -> Self {
        Self::new(NarrationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn narrator(chunk_size: usize) -> Narrator {
        Narrator::new(NarrationConfig {
            chunk_size,
            voice: VoiceConfig::default(),
        })
    }

    /// Drive the narrator to completion, acknowledging every chunk.
    fn run_to_completion(n: &mut Narrator, first: Option<SpeakRequest>) -> Vec<String> {
        let mut spoken = Vec::new();
        let mut next = first;
        while let Some(request) = next {
            spoken.push(request.text.clone());
            next = match n.chunk_finished(request.ticket) {
                CompletionOutcome::Advanced(effects) => effects.speak,
                CompletionOutcome::Stale => panic!("live ticket reported stale"),
            };
        }
        spoken
    }

    #[test]
    fn test_chunking_scenario_3200_chars() {
        let text = "a".repeat(3200);
        let mut n = narrator(1500);

        let effects = n.toggle(&text);
        let spoken = run_to_completion(&mut n, effects.speak);

        let lengths: Vec<usize> = spoken.iter().map(|c| c.chars().count()).collect();
        assert_eq!(lengths, vec![1500, 1500, 200]);
        assert_eq!(n.state(), NarrationState::Completed);
        assert_eq!(n.status().cursor, 3200);
        assert_eq!(n.status().chunks_spoken, 3);
        assert_eq!(n.status().chunks_total, 3);
    }

    #[test]
    fn test_chunk_concatenation_matches_filtered_text() {
        let text = "(Intro) **Bold** words, with *stars* and ünïcödé ✓ across chunks. ".repeat(13);
        for chunk_size in [1, 7, 64, 500, 10_000] {
            let mut n = narrator(chunk_size);
            let effects = n.toggle(&text);
            let spoken = run_to_completion(&mut n, effects.speak);

            let filtered = strip_narration_noise(&text);
            let len = filtered.chars().count();
            assert_eq!(spoken.len(), len.div_ceil(chunk_size));
            assert_eq!(spoken.concat(), filtered);
            assert_eq!(n.state(), NarrationState::Completed);
        }
    }

    #[test]
    fn test_toggle_from_idle_issues_exactly_one_call() {
        let mut n = narrator(10);
        assert_eq!(n.state(), NarrationState::Idle);

        let effects = n.toggle("hello world, this is long");
        assert_eq!(n.state(), NarrationState::Speaking);
        assert!(effects.cancel.is_none());
        let request = effects.speak.expect("first chunk");
        assert_eq!(request.text, "hello worl");
        assert_eq!(request.ticket.index, 0);
        assert_eq!(n.session().unwrap().outstanding(), Some(&request.ticket));
    }

    #[test]
    fn test_pause_during_chunk_resumes_same_chunk() {
        let text: String = ('a'..='z').collect();
        let mut n = narrator(5);

        let first = n.toggle(&text).speak.unwrap();
        let second = match n.chunk_finished(first.ticket) {
            CompletionOutcome::Advanced(e) => e.speak.unwrap(),
            CompletionOutcome::Stale => panic!("unexpected stale"),
        };
        assert_eq!(second.text, "fghij");

        // Pause while chunk 1 is in flight
        let paused = n.toggle(&text);
        assert_eq!(paused.cancel, Some(second.ticket));
        assert!(paused.speak.is_none());
        assert_eq!(n.state(), NarrationState::Paused);
        assert_eq!(n.status().cursor, 5);

        // The interrupted chunk completing late must not advance the cursor
        assert_eq!(n.chunk_finished(second.ticket), CompletionOutcome::Stale);
        assert_eq!(n.status().cursor, 5);

        let resumed = n.toggle(&text).speak.unwrap();
        assert_eq!(n.state(), NarrationState::Speaking);
        assert_eq!(resumed.text, "fghij");
        assert_eq!(resumed.ticket.index, 1);
        assert_ne!(resumed.ticket, second.ticket);

        // Even after resuming, the interrupted call stays stale
        assert_eq!(n.chunk_finished(second.ticket), CompletionOutcome::Stale);
        assert_eq!(n.session().unwrap().outstanding(), Some(&resumed.ticket));
    }

    #[test]
    fn test_new_text_replaces_session_without_interleaving() {
        let old = "o".repeat(30);
        let new = "n".repeat(30);
        let mut n = narrator(10);

        let old_first = n.toggle(&old).speak.unwrap();
        let old_id = old_first.ticket.session;

        let replaced = n.toggle(&new);
        assert_eq!(replaced.cancel, Some(old_first.ticket));
        let new_first = replaced.speak.unwrap();
        assert_ne!(new_first.ticket.session, old_id);
        assert_eq!(n.status().cursor, 0);

        // Late completion of the abandoned session is ignored
        assert_eq!(n.chunk_finished(old_first.ticket), CompletionOutcome::Stale);

        let spoken = run_to_completion(&mut n, Some(new_first));
        assert!(spoken.iter().all(|chunk| chunk.chars().all(|c| c == 'n')));
        assert_eq!(spoken.concat(), new);
    }

    #[test]
    fn test_completed_session_restarts_from_zero() {
        let mut n = narrator(4);
        let first = n.toggle("abcdef").speak;
        run_to_completion(&mut n, first);
        assert_eq!(n.state(), NarrationState::Completed);
        let finished_id = n.status().session_id.unwrap();

        let restart = n.toggle("abcdef").speak.unwrap();
        assert_eq!(restart.text, "abcd");
        assert_eq!(restart.ticket.start, 0);
        assert_ne!(restart.ticket.session, finished_id);
        assert_eq!(n.state(), NarrationState::Speaking);
    }

    #[test]
    fn test_empty_text_completes_without_calls() {
        let mut n = narrator(10);
        let effects = n.toggle("**()**");
        assert!(effects.speak.is_none());
        assert_eq!(n.state(), NarrationState::Completed);
        assert_eq!(n.status().total, 0);
        assert_eq!(n.status().chunks_total, 0);
    }

    #[test]
    fn test_filtering_strips_markers_before_chunking() {
        let mut n = narrator(100);
        let request = n.toggle("**Note** (see below) *now*").speak.unwrap();
        assert_eq!(request.text, "Note see below now");
    }

    #[test]
    fn test_failure_pauses_on_failed_chunk() {
        let mut n = narrator(3);
        let first = n.toggle("abcdefg").speak.unwrap();
        assert!(n.chunk_failed(first.ticket));
        assert_eq!(n.state(), NarrationState::Paused);
        assert_eq!(n.status().cursor, 0);

        // Retrying re-issues the same range under a fresh outstanding ticket
        let retry = n.toggle("abcdefg").speak.unwrap();
        assert_eq!(retry.text, "abc");
        assert_ne!(retry.ticket, first.ticket);
        assert!(!n.chunk_failed(first.ticket));
        assert_eq!(n.state(), NarrationState::Speaking);
    }

    #[test]
    fn test_stop_returns_to_idle() {
        let mut n = narrator(3);
        let first = n.toggle("abcdefg").speak.unwrap();
        let effects = n.stop();
        assert_eq!(effects.cancel, Some(first.ticket));
        assert_eq!(n.state(), NarrationState::Idle);
        assert_eq!(n.status(), NarrationStatus::default());
        assert_eq!(n.chunk_finished(first.ticket), CompletionOutcome::Stale);
        assert!(n.stop().is_empty());
    }

    #[test]
    fn test_cursor_never_exceeds_length() {
        let mut n = narrator(1000);
        let first = n.toggle("short").speak.unwrap();
        assert_eq!(first.ticket.end, 5);
        run_to_completion(&mut n, Some(first));
        let status = n.status();
        assert_eq!(status.cursor, status.total);
    }

    #[test]
    fn test_start_restarts_even_for_same_text() {
        let mut n = narrator(4);
        let first = n.toggle("abcdefgh").speak.unwrap();
        n.toggle("abcdefgh");
        assert_eq!(n.state(), NarrationState::Paused);

        let effects = n.start("abcdefgh");
        let restarted = effects.speak.unwrap();
        assert_eq!(effects.cancel, None);
        assert_ne!(restarted.ticket.session, first.ticket.session);
        assert_eq!(restarted.ticket.start, 0);
        assert_eq!(n.state(), NarrationState::Speaking);
    }
}
