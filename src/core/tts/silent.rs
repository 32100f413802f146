//! Log-only synthesizer.
//!
//! Produces no audio. Each chunk is logged and held for an estimated reading
//! time, so narration keeps realistic pacing (and remains pausable) when no
//! speech provider is configured.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::core::tts::base::{SpeechSynthesizer, TTSResult, VoiceConfig};

/// Average narration speed at rate 1.0.
pub const CHARS_PER_SECOND: f64 = 15.0;

#[derive(Debug, Clone)]
pub struct SilentSynthesizer {
    /// Multiplier applied to the estimated duration; 0 makes chunks instant
    time_scale: f64,
}

impl SilentSynthesizer {
    pub fn new() -> Self {
        Self { time_scale: 1.0 }
    }

    pub fn with_time_scale(time_scale: f64) -> Self {
        Self {
            time_scale: time_scale.max(0.0),
        }
    }

    /// Estimated time to read `text` aloud at `rate`.
    pub fn estimate_duration(&self, text: &str, rate: f32) -> Duration {
        let rate = if rate > 0.0 { rate as f64 } else { 1.0 };
        let seconds = text.chars().count() as f64 / (CHARS_PER_SECOND * rate);
        Duration::from_secs_f64(seconds * self.time_scale)
    }
}

impl Default for SilentSynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SpeechSynthesizer for SilentSynthesizer {
    async fn speak(&self, text: &str, voice: &VoiceConfig) -> TTSResult<()> {
        let duration = self.estimate_duration(text, voice.rate);
        info!(
            voice = %voice.voice,
            chars = text.chars().count(),
            duration_ms = duration.as_millis() as u64,
            "Narrating chunk (silent)"
        );
        tokio::time::sleep(duration).await;
        Ok(())
    }

    async fn pause(&self) {
        info!("Silent narration paused");
    }

    fn name(&self) -> &'static str {
        "silent"
    }
}
