//! OpenAI speech synthesizer.
//!
//! # API Reference
//!
//! - Endpoint: `POST {base_url}/v1/audio/speech`
//! - Output: raw PCM, 24kHz 16-bit mono little-endian
//! - Speed: 0.25 to 4.0
//!
//! Each chunk is fetched (or served from the audio cache), broadcast to audio
//! listeners, and then held for its playback duration so that `speak` resolves
//! when the utterance has finished rather than when the bytes arrived.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use moka::future::Cache;
use serde_json::json;
use tracing::{debug, info};
use xxhash_rust::xxh3::xxh3_128;

use super::config::{OpenAISynthesizerConfig, OpenAITTSModel, OpenAIVoice};
use crate::core::tts::base::{
    AudioBroadcast, AudioEvent, SpeechSynthesizer, TTSError, TTSResult, VoiceConfig,
};

/// OpenAI PCM output sample rate
pub const PCM_SAMPLE_RATE: u32 = 24000;

/// 24kHz * 2 bytes per 16-bit mono sample
const PCM_BYTES_PER_SECOND: f64 = 48_000.0;

const MIN_SPEED: f32 = 0.25;
const MAX_SPEED: f32 = 4.0;

// =============================================================================
// Helpers
// =============================================================================

/// Playback duration of a PCM buffer.
pub fn pcm_duration(byte_len: usize) -> Duration {
    Duration::from_secs_f64(byte_len as f64 / PCM_BYTES_PER_SECOND)
}

/// Cache key for one synthesized chunk.
fn compute_audio_cache_key(
    model: OpenAITTSModel,
    voice: OpenAIVoice,
    speed: f32,
    text: &str,
) -> String {
    let mut s = String::with_capacity(text.len() + 48);
    s.push_str("openai");
    s.push('|');
    s.push_str(model.as_str());
    s.push('|');
    s.push_str(voice.as_str());
    s.push('|');
    s.push_str(&format!("{speed:.3}"));
    s.push('|');
    s.push_str(text);
    let hash = xxh3_128(s.as_bytes());
    format!("{hash:032x}")
}

// =============================================================================
// OpenAI Synthesizer
// =============================================================================

pub struct OpenAISynthesizer {
    client: reqwest::Client,
    config: OpenAISynthesizerConfig,
    audio: AudioBroadcast,
    cache: Cache<String, Bytes>,
}

impl OpenAISynthesizer {
    pub fn new(config: OpenAISynthesizerConfig, audio: AudioBroadcast) -> TTSResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(TTSError::InvalidConfiguration(
                "OpenAI API key is required for the openai synthesizer".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TTSError::InvalidConfiguration(format!("HTTP client: {e}")))?;

        let cache = Cache::builder().max_capacity(config.cache_capacity).build();

        Ok(Self {
            client,
            config,
            audio,
            cache,
        })
    }

    fn build_http_request(
        &self,
        text: &str,
        voice: OpenAIVoice,
        speed: f32,
    ) -> reqwest::RequestBuilder {
        let mut body = json!({
            "model": self.config.model.as_str(),
            "input": text,
            "voice": voice.as_str(),
            "response_format": "pcm",
        });

        // Add speed if not default (1.0)
        if (speed - 1.0).abs() > 0.001 {
            body["speed"] = json!(speed);
        }

        self.client
            .post(self.config.speech_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
    }

    async fn fetch_audio(&self, text: &str, voice: OpenAIVoice, speed: f32) -> TTSResult<Bytes> {
        let response = self
            .build_http_request(text, voice, speed)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TTSError::Timeout(e.to_string())
                } else {
                    TTSError::NetworkError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TTSError::ProviderError(format!(
                "OpenAI TTS API error ({status}): {body}"
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| TTSError::NetworkError(e.to_string()))?;
        if audio.is_empty() {
            return Err(TTSError::AudioGenerationFailed(
                "OpenAI TTS returned an empty body".to_string(),
            ));
        }
        Ok(audio)
    }

    /// Synthesize `text` without playing it, using the audio cache.
    pub async fn synthesize(&self, text: &str, voice: &VoiceConfig) -> TTSResult<Bytes> {
        let voice_id = OpenAIVoice::from_str_or_default(&voice.voice);
        let speed = voice.rate.clamp(MIN_SPEED, MAX_SPEED);
        let key = compute_audio_cache_key(self.config.model, voice_id, speed, text);

        if let Some(audio) = self.cache.get(&key).await {
            debug!(bytes = audio.len(), "OpenAI TTS cache hit");
            return Ok(audio);
        }

        let audio = self.fetch_audio(text, voice_id, speed).await?;
        self.cache.insert(key, audio.clone()).await;
        Ok(audio)
    }
}

#[async_trait]
impl SpeechSynthesizer for OpenAISynthesizer {
    async fn speak(&self, text: &str, voice: &VoiceConfig) -> TTSResult<()> {
        let audio = self.synthesize(text, voice).await?;
        let duration = pcm_duration(audio.len());

        let listeners = self.audio.publish(AudioEvent::Chunk {
            data: audio,
            sample_rate: PCM_SAMPLE_RATE,
        });
        info!(
            chars = text.chars().count(),
            listeners,
            duration_ms = duration.as_millis() as u64,
            "OpenAI TTS chunk playing"
        );

        tokio::time::sleep(duration).await;
        Ok(())
    }

    async fn pause(&self) {
        self.audio.publish(AudioEvent::Stop);
    }

    fn name(&self) -> &'static str {
        "openai"
    }

    fn get_provider_info(&self) -> serde_json::Value {
        json!({
            "provider": "openai",
            "api_type": "HTTP REST",
            "model": self.config.model.as_str(),
            "output_format": "pcm",
            "sample_rate": PCM_SAMPLE_RATE,
            "supported_voices": OpenAIVoice::all().iter().map(|v| v.as_str()).collect::<Vec<_>>(),
            "speed_range": { "min": MIN_SPEED, "max": MAX_SPEED },
            "endpoint": self.config.speech_url(),
        })
    }
}
