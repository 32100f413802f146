//! Configuration module for the Neura server
//!
//! This module handles server configuration from various sources: .env files, YAML files,
//! and environment variables. Priority: YAML > ENV vars > .env values > defaults.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Merging YAML and environment configurations
//! - `validation`: Configuration validation logic
//! - `utils`: Utility functions for configuration parsing
//!
//! # Example
//! ```rust,no_run
//! use neura::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable overrides
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::time::Duration;

mod env;
mod merge;
mod utils;
mod validation;
mod yaml;

use crate::core::llm::GeminiConfig;
use crate::core::narration::{ControllerOptions, NarrationConfig};
use crate::core::tts::{OpenAISynthesizerConfig, OpenAITTSModel, VoiceConfig};

/// Server configuration
///
/// Contains all configuration needed to run the Neura server, including:
/// - Server settings (host, port)
/// - Text generation settings (Gemini)
/// - Speech synthesis settings (OpenAI or silent)
/// - Narration settings (voice, rate, chunk size)
/// - Security settings (CORS, rate limiting)
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    // Text generation
    /// Gemini API key; generation requests fail with a 502 when unset
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub gemini_timeout_seconds: u64,

    // Speech synthesis
    /// OpenAI API key for the audio speech endpoint
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    /// "openai" or "silent"; when unset, openai is used if a key is present
    pub tts_provider: Option<String>,
    pub tts_model: String,

    // Narration
    pub narration_voice: String,
    pub narration_rate: f32,
    /// Characters per synthesis call
    pub narration_chunk_size: usize,
    /// Start narrating freshly generated text automatically
    pub narration_auto_play: bool,
    /// Treat a chunk as failed after this long; None waits forever
    pub narration_chunk_timeout_seconds: Option<u64>,

    // Security configuration
    /// CORS allowed origins (comma-separated list or "*" for all)
    /// Default: None (CORS disabled, same-origin only)
    pub cors_allowed_origins: Option<String>,

    // Rate limiting configuration
    /// Maximum requests per second per IP address
    /// Default: 60
    pub rate_limit_requests_per_second: u32,
    /// Maximum burst size for rate limiting
    /// Default: 10
    pub rate_limit_burst_size: u32,
}

/// Implement Drop to zeroize all secret fields when ServerConfig is dropped.
impl Drop for ServerConfig {
    fn drop(&mut self) {
        use zeroize::Zeroize;

        if let Some(ref mut key) = self.gemini_api_key {
            key.zeroize();
        }
        if let Some(ref mut key) = self.openai_api_key {
            key.zeroize();
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables and defaults.
    ///
    /// Call `dotenvy::dotenv()` first to pick up `.env` values; real
    /// environment variables override them.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = merge::merge_config(None)?;
        validation::validate_all(&config)?;
        Ok(config)
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - Configuration validation fails
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let yaml_config = yaml::YamlConfig::from_file(path)?;
        let config = merge::merge_config(Some(yaml_config))?;
        validation::validate_all(&config)?;
        Ok(config)
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Effective synthesizer name: explicit setting, else openai when keyed, else silent.
    pub fn tts_provider(&self) -> String {
        match &self.tts_provider {
            Some(provider) => provider.to_lowercase(),
            None if self.openai_api_key.is_some() => "openai".to_string(),
            None => "silent".to_string(),
        }
    }

    /// Gemini client settings, if a key is configured.
    pub fn gemini_config(&self) -> Option<GeminiConfig> {
        let api_key = self.gemini_api_key.as_ref()?;
        let mut config = GeminiConfig::new(api_key.clone());
        config.model = self.gemini_model.clone();
        config.base_url = self.gemini_base_url.clone();
        config.request_timeout = Duration::from_secs(self.gemini_timeout_seconds);
        Some(config)
    }

    /// OpenAI synthesizer settings, if a key is configured.
    pub fn openai_synthesizer_config(&self) -> Option<OpenAISynthesizerConfig> {
        let api_key = self.openai_api_key.as_ref()?;
        let mut config = OpenAISynthesizerConfig::new(api_key.clone());
        config.base_url = self.openai_base_url.clone();
        config.model = OpenAITTSModel::from_str_or_default(&self.tts_model);
        Some(config)
    }

    pub fn voice_config(&self) -> VoiceConfig {
        VoiceConfig {
            voice: self.narration_voice.clone(),
            rate: self.narration_rate,
        }
    }

    pub fn narration_config(&self) -> NarrationConfig {
        NarrationConfig {
            chunk_size: self.narration_chunk_size,
            voice: self.voice_config(),
        }
    }

    pub fn controller_options(&self) -> ControllerOptions {
        ControllerOptions {
            chunk_timeout: self.narration_chunk_timeout_seconds.map(Duration::from_secs),
        }
    }
}
