use serde::Deserialize;
use std::path::PathBuf;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration. Values present in
/// the file override environment variables.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 3000
///
/// providers:
///   gemini_api_key: "your-gemini-key"
///   openai_api_key: "your-openai-key"
///
/// gemini:
///   model: "gemini-1.5-flash"
///   base_url: "https://generativelanguage.googleapis.com"
///   timeout_seconds: 60
///
/// tts:
///   provider: "openai"
///   model: "tts-1"
///   base_url: "https://api.openai.com"
///
/// narration:
///   voice: "fable"
///   rate: 1.2
///   chunk_size: 1500
///   auto_play: true
///   chunk_timeout_seconds: 120
///
/// security:
///   cors_allowed_origins: "*"
///   rate_limit_requests_per_second: 60
///   rate_limit_burst_size: 10
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub providers: Option<ProvidersYaml>,
    pub gemini: Option<GeminiYaml>,
    pub tts: Option<TtsYaml>,
    pub narration: Option<NarrationYaml>,
    pub security: Option<SecurityYaml>,
}

/// Server configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Provider API keys from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ProvidersYaml {
    pub gemini_api_key: Option<String>,
    pub openai_api_key: Option<String>,
}

/// Text generation settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeminiYaml {
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
}

/// Speech synthesis settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct TtsYaml {
    /// "openai" or "silent"
    pub provider: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

/// Narration settings from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct NarrationYaml {
    pub voice: Option<String>,
    pub rate: Option<f32>,
    pub chunk_size: Option<usize>,
    pub auto_play: Option<bool>,
    pub chunk_timeout_seconds: Option<u64>,
}

/// Security configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SecurityYaml {
    pub cors_allowed_origins: Option<String>,
    pub rate_limit_requests_per_second: Option<u32>,
    pub rate_limit_burst_size: Option<u32>,
}

impl YamlConfig {
    /// Load YAML configuration from a file
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;

        Ok(config)
    }
}
