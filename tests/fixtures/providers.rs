use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc, oneshot};

use neura::core::llm::{GenerationResult, TextGenerator};
use neura::core::tts::{SpeechSynthesizer, TTSResult, VoiceConfig};

/// One `speak` call waiting for the test to decide its outcome.
///
/// Dropping it without calling `complete` means the call never finishes.
pub struct PendingCall {
    pub text: String,
    pub voice: VoiceConfig,
    done: oneshot::Sender<TTSResult<()>>,
}

impl PendingCall {
    pub fn complete(self) {
        let _ = self.done.send(Ok(()));
    }

    pub fn fail(self, error: neura::core::tts::TTSError) {
        let _ = self.done.send(Err(error));
    }
}

/// Synthesizer that hands every call to the test.
pub struct ScriptedSynthesizer {
    calls: mpsc::UnboundedSender<PendingCall>,
    pauses: AtomicUsize,
}

impl ScriptedSynthesizer {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<PendingCall>) {
        let (calls, rx) = mpsc::unbounded_channel();
        (
            Arc::new(Self {
                calls,
                pauses: AtomicUsize::new(0),
            }),
            rx,
        )
    }

    pub fn pause_count(&self) -> usize {
        self.pauses.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSynthesizer for ScriptedSynthesizer {
    async fn speak(&self, text: &str, voice: &VoiceConfig) -> TTSResult<()> {
        let (done, outcome) = oneshot::channel();
        let _ = self.calls.send(PendingCall {
            text: text.to_string(),
            voice: voice.clone(),
            done,
        });
        match outcome.await {
            Ok(result) => result,
            Err(_) => std::future::pending().await,
        }
    }

    async fn pause(&self) {
        self.pauses.fetch_add(1, Ordering::SeqCst);
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// Receive the next call, failing the test if none arrives in time.
pub async fn next_call(rx: &mut mpsc::UnboundedReceiver<PendingCall>) -> PendingCall {
    tokio::time::timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("timed out waiting for a synthesis call")
        .expect("synthesizer dropped")
}

/// Assert no call is issued within a short window.
pub async fn assert_no_call(rx: &mut mpsc::UnboundedReceiver<PendingCall>) {
    let result = tokio::time::timeout(Duration::from_millis(100), rx.recv()).await;
    assert!(result.is_err(), "unexpected synthesis call issued");
}

/// Generator returning a fixed reply and counting invocations.
pub struct CountingGenerator {
    reply: String,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl CountingGenerator {
    pub fn new(reply: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.into(),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().await.clone()
    }
}

#[async_trait]
impl TextGenerator for CountingGenerator {
    async fn generate(&self, prompt: &str) -> GenerationResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().await = Some(prompt.to_string());
        Ok(self.reply.clone())
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}
