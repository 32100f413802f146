use super::ServerConfig;
use super::env::load_from_env;
use super::yaml::YamlConfig;

/// Environment variables (with defaults) form the base; YAML values win.
pub(super) fn merge_config(
    yaml: Option<YamlConfig>,
) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let mut config = load_from_env()?;

    let Some(yaml) = yaml else {
        return Ok(config);
    };

    if let Some(server) = yaml.server {
        if let Some(host) = server.host {
            config.host = host;
        }
        if let Some(port) = server.port {
            config.port = port;
        }
    }

    if let Some(providers) = yaml.providers {
        if providers.gemini_api_key.is_some() {
            config.gemini_api_key = providers.gemini_api_key;
        }
        if providers.openai_api_key.is_some() {
            config.openai_api_key = providers.openai_api_key;
        }
    }

    if let Some(gemini) = yaml.gemini {
        if let Some(model) = gemini.model {
            config.gemini_model = model;
        }
        if let Some(base_url) = gemini.base_url {
            config.gemini_base_url = base_url;
        }
        if let Some(timeout) = gemini.timeout_seconds {
            config.gemini_timeout_seconds = timeout;
        }
    }

    if let Some(tts) = yaml.tts {
        if tts.provider.is_some() {
            config.tts_provider = tts.provider;
        }
        if let Some(model) = tts.model {
            config.tts_model = model;
        }
        if let Some(base_url) = tts.base_url {
            config.openai_base_url = base_url;
        }
    }

    if let Some(narration) = yaml.narration {
        if let Some(voice) = narration.voice {
            config.narration_voice = voice;
        }
        if let Some(rate) = narration.rate {
            config.narration_rate = rate;
        }
        if let Some(chunk_size) = narration.chunk_size {
            config.narration_chunk_size = chunk_size;
        }
        if let Some(auto_play) = narration.auto_play {
            config.narration_auto_play = auto_play;
        }
        if narration.chunk_timeout_seconds.is_some() {
            config.narration_chunk_timeout_seconds = narration.chunk_timeout_seconds;
        }
    }

    if let Some(security) = yaml.security {
        if security.cors_allowed_origins.is_some() {
            config.cors_allowed_origins = security.cors_allowed_origins;
        }
        if let Some(rps) = security.rate_limit_requests_per_second {
            config.rate_limit_requests_per_second = rps;
        }
        if let Some(burst) = security.rate_limit_burst_size {
            config.rate_limit_burst_size = burst;
        }
    }

    Ok(config)
}
