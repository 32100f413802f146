//! OpenAI speech synthesizer module.
//!
//! Synthesizes narration chunks with OpenAI's Audio Speech API and streams the
//! resulting PCM to audio listeners.
//!
//! # Example
//!
//! ```rust,ignore
//! use neura::core::tts::{AudioBroadcast, OpenAISynthesizer, OpenAISynthesizerConfig, SpeechSynthesizer, VoiceConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = OpenAISynthesizerConfig::new("sk-...");
//!     let tts = OpenAISynthesizer::new(config, AudioBroadcast::new()).unwrap();
//!     tts.speak("Hello, world!", &VoiceConfig::default()).await.unwrap();
//! }
//! ```

mod config;
mod provider;

pub use config::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_REQUEST_TIMEOUT, OPENAI_API_BASE_URL, OpenAISynthesizerConfig,
    OpenAITTSModel, OpenAIVoice,
};
pub use provider::{OpenAISynthesizer, PCM_SAMPLE_RATE, pcm_duration};
