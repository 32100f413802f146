//! Base traits and types for speech synthesizers.
//!
//! A synthesizer turns one bounded chunk of text into speech. `speak` resolves
//! once the utterance has finished playing, which is the completion signal the
//! narration controller waits for before issuing the next chunk.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;

/// Default voice identity passed to the synthesizer.
pub const DEFAULT_VOICE: &str = "fable";

/// Default playback rate.
pub const DEFAULT_RATE: f32 = 1.2;

/// Capacity of the audio fan-out channel.
const AUDIO_CHANNEL_CAPACITY: usize = 64;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur during speech synthesis.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TTSError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Provider error: {0}")]
    ProviderError(String),

    #[error("Audio generation failed: {0}")]
    AudioGenerationFailed(String),

    #[error("Synthesis timed out: {0}")]
    Timeout(String),
}

pub type TTSResult<T> = Result<T, TTSError>;

// =============================================================================
// Voice Configuration
// =============================================================================

/// Fixed parameters passed to the synthesizer with every chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceConfig {
    /// Voice identity understood by the configured provider
    pub voice: String,
    /// Playback rate, 1.0 being normal speed
    pub rate: f32,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            voice: DEFAULT_VOICE.to_string(),
            rate: DEFAULT_RATE,
        }
    }
}

// =============================================================================
// Audio Fan-out
// =============================================================================

/// Audio stream events delivered to listeners (browser sessions).
#[derive(Debug, Clone, PartialEq)]
pub enum AudioEvent {
    /// Raw PCM for one chunk
    Chunk {
        data: Bytes,
        sample_rate: u32,
    },
    /// Listeners must stop whatever is currently playing
    Stop,
}

/// Broadcast channel shared by synthesizers and audio listeners.
#[derive(Debug, Clone)]
pub struct AudioBroadcast {
    sender: broadcast::Sender<AudioEvent>,
}

impl AudioBroadcast {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(AUDIO_CHANNEL_CAPACITY);
        Self { sender }
    }

    /// Send an event; returns how many listeners received it.
    pub fn publish(&self, event: AudioEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AudioEvent> {
        self.sender.subscribe()
    }

    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for AudioBroadcast {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Synthesizer Trait
// =============================================================================

/// Speech-synthesis collaborator used by the narration controller.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Speak one chunk. Resolves when the utterance has finished.
    async fn speak(&self, text: &str, voice: &VoiceConfig) -> TTSResult<()>;

    /// Out-of-band request to stop whatever is currently playing.
    async fn pause(&self);

    /// Provider name for logs and status output.
    fn name(&self) -> &'static str;

    fn get_provider_info(&self) -> serde_json::Value {
        serde_json::json!({ "provider": self.name() })
    }
}
