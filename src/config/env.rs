use super::ServerConfig;
use super::utils::{env_bool, env_parse, env_string};
use crate::core::llm::gemini::{DEFAULT_GEMINI_MODEL, GEMINI_API_BASE_URL};
use crate::core::narration::DEFAULT_CHUNK_SIZE;
use crate::core::tts::openai::OPENAI_API_BASE_URL;
use crate::core::tts::{DEFAULT_RATE, DEFAULT_VOICE};

pub(super) const DEFAULT_HOST: &str = "0.0.0.0";
pub(super) const DEFAULT_PORT: u16 = 3000;
pub(super) const DEFAULT_GEMINI_TIMEOUT_SECONDS: u64 = 60;
pub(super) const DEFAULT_TTS_MODEL: &str = "tts-1";
pub(super) const DEFAULT_RATE_LIMIT_RPS: u32 = 60;
pub(super) const DEFAULT_RATE_LIMIT_BURST: u32 = 10;

/// Build a configuration from environment variables and defaults.
///
/// `.env` values are already in the process environment at this point
/// (loaded by the binary at startup), so real env vars win over them.
pub(super) fn load_from_env() -> Result<ServerConfig, Box<dyn std::error::Error>> {
    Ok(ServerConfig {
        host: env_string("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port: env_parse("PORT")?.unwrap_or(DEFAULT_PORT),

        gemini_api_key: env_string("GEMINI_API_KEY"),
        gemini_model: env_string("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
        gemini_base_url: env_string("GEMINI_BASE_URL")
            .unwrap_or_else(|| GEMINI_API_BASE_URL.to_string()),
        gemini_timeout_seconds: env_parse("GEMINI_TIMEOUT_SECONDS")?
            .unwrap_or(DEFAULT_GEMINI_TIMEOUT_SECONDS),

        openai_api_key: env_string("OPENAI_API_KEY"),
        openai_base_url: env_string("OPENAI_BASE_URL")
            .unwrap_or_else(|| OPENAI_API_BASE_URL.to_string()),
        tts_provider: env_string("TTS_PROVIDER"),
        tts_model: env_string("TTS_MODEL").unwrap_or_else(|| DEFAULT_TTS_MODEL.to_string()),

        narration_voice: env_string("NARRATION_VOICE").unwrap_or_else(|| DEFAULT_VOICE.to_string()),
        narration_rate: env_parse("NARRATION_RATE")?.unwrap_or(DEFAULT_RATE),
        narration_chunk_size: env_parse("NARRATION_CHUNK_SIZE")?.unwrap_or(DEFAULT_CHUNK_SIZE),
        narration_auto_play: env_bool("NARRATION_AUTO_PLAY")?.unwrap_or(true),
        narration_chunk_timeout_seconds: env_parse("NARRATION_CHUNK_TIMEOUT_SECONDS")?,

        cors_allowed_origins: env_string("CORS_ALLOWED_ORIGINS"),
        rate_limit_requests_per_second: env_parse("RATE_LIMIT_REQUESTS_PER_SECOND")?
            .unwrap_or(DEFAULT_RATE_LIMIT_RPS),
        rate_limit_burst_size: env_parse("RATE_LIMIT_BURST_SIZE")?
            .unwrap_or(DEFAULT_RATE_LIMIT_BURST),
    })
}
