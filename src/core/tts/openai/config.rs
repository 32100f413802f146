//! Configuration types for the OpenAI speech synthesizer.
//!
//! - Model selection (tts-1, tts-1-hd, gpt-4o-mini-tts)
//! - Voice selection (11 available voices)
//! - Endpoint, timeout and audio cache sizing

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default OpenAI API base URL
pub const OPENAI_API_BASE_URL: &str = "https://api.openai.com";

/// Default request timeout for one chunk
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Default number of synthesized chunks kept in memory
pub const DEFAULT_CACHE_CAPACITY: u64 = 256;

// =============================================================================
// OpenAI TTS Models
// =============================================================================

/// Supported OpenAI TTS models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpenAITTSModel {
    /// Standard quality, lower latency
    #[default]
    #[serde(rename = "tts-1")]
    Tts1,
    /// High definition, higher latency
    #[serde(rename = "tts-1-hd")]
    Tts1Hd,
    #[serde(rename = "gpt-4o-mini-tts")]
    Gpt4oMiniTts,
}

impl OpenAITTSModel {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tts1 => "tts-1",
            Self::Tts1Hd => "tts-1-hd",
            Self::Gpt4oMiniTts => "gpt-4o-mini-tts",
        }
    }

    /// Parse from string, with fallback to default.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "tts-1" | "tts1" => Self::Tts1,
            "tts-1-hd" | "tts1-hd" | "tts1hd" => Self::Tts1Hd,
            "gpt-4o-mini-tts" | "gpt4o-mini-tts" => Self::Gpt4oMiniTts,
            _ => Self::default(),
        }
    }
}

impl std::fmt::Display for OpenAITTSModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// OpenAI TTS Voices
// =============================================================================

/// Available voices for OpenAI TTS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenAIVoice {
    Alloy,
    Ash,
    Ballad,
    Coral,
    Echo,
    /// British-accented narrator voice, the narration default
    #[default]
    Fable,
    Onyx,
    Nova,
    Sage,
    Shimmer,
    Verse,
}

impl OpenAIVoice {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alloy => "alloy",
            Self::Ash => "ash",
            Self::Ballad => "ballad",
            Self::Coral => "coral",
            Self::Echo => "echo",
            Self::Fable => "fable",
            Self::Onyx => "onyx",
            Self::Nova => "nova",
            Self::Sage => "sage",
            Self::Shimmer => "shimmer",
            Self::Verse => "verse",
        }
    }

    /// Parse from string, with fallback to default.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "alloy" => Self::Alloy,
            "ash" => Self::Ash,
            "ballad" => Self::Ballad,
            "coral" => Self::Coral,
            "echo" => Self::Echo,
            "fable" => Self::Fable,
            "onyx" => Self::Onyx,
            "nova" => Self::Nova,
            "sage" => Self::Sage,
            "shimmer" => Self::Shimmer,
            "verse" => Self::Verse,
            _ => Self::default(),
        }
    }

    pub fn all() -> &'static [OpenAIVoice] {
        &[
            Self::Alloy,
            Self::Ash,
            Self::Ballad,
            Self::Coral,
            Self::Echo,
            Self::Fable,
            Self::Onyx,
            Self::Nova,
            Self::Sage,
            Self::Shimmer,
            Self::Verse,
        ]
    }
}

impl std::fmt::Display for OpenAIVoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Synthesizer Configuration
// =============================================================================

/// Connection settings for [`super::OpenAISynthesizer`].
#[derive(Debug, Clone)]
pub struct OpenAISynthesizerConfig {
    pub api_key: String,
    /// Base URL without trailing slash, overridable for compatible servers
    pub base_url: String,
    pub model: OpenAITTSModel,
    pub request_timeout: Duration,
    pub cache_capacity: u64,
}

impl OpenAISynthesizerConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: OPENAI_API_BASE_URL.to_string(),
            model: OpenAITTSModel::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }

    /// Full URL of the speech endpoint.
    pub fn speech_url(&self) -> String {
        format!("{}/v1/audio/speech", self.base_url.trim_end_matches('/'))
    }
}
