//! Test Fixtures Module
//!
//! This module provides test fixtures for Neura testing:
//! - Configuration fixtures
//! - A scripted speech synthesizer whose calls complete on demand
//! - A counting text generator

// Allow dead code in test fixtures - not every test binary uses every fixture
#![allow(dead_code)]

pub mod providers;

pub use providers::*;

use neura::ServerConfig;

/// Minimal configuration: no API keys, silent narration.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 3000,
        gemini_api_key: None,
        gemini_model: "gemini-1.5-flash".to_string(),
        gemini_base_url: "http://127.0.0.1:9".to_string(),
        gemini_timeout_seconds: 5,
        openai_api_key: None,
        openai_base_url: "http://127.0.0.1:9".to_string(),
        tts_provider: Some("silent".to_string()),
        tts_model: "tts-1".to_string(),
        narration_voice: "fable".to_string(),
        narration_rate: 1.2,
        narration_chunk_size: 1500,
        narration_auto_play: true,
        narration_chunk_timeout_seconds: None,
        cors_allowed_origins: None,
        rate_limit_requests_per_second: 60,
        rate_limit_burst_size: 10,
    }
}
