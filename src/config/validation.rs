use super::ServerConfig;

/// Highest accepted narration rate.
const MAX_NARRATION_RATE: f32 = 10.0;

pub(super) fn validate_server(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.port == 0 {
        return Err("PORT must be a non-zero port number".into());
    }
    if config.host.trim().is_empty() {
        return Err("HOST must not be empty".into());
    }
    Ok(())
}

pub(super) fn validate_narration(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.narration_chunk_size == 0 {
        return Err("NARRATION_CHUNK_SIZE must be greater than 0".into());
    }
    if !(config.narration_rate > 0.0 && config.narration_rate <= MAX_NARRATION_RATE) {
        return Err(format!(
            "NARRATION_RATE must be in (0, {MAX_NARRATION_RATE}], got {}",
            config.narration_rate
        )
        .into());
    }
    if config.narration_chunk_timeout_seconds == Some(0) {
        return Err("NARRATION_CHUNK_TIMEOUT_SECONDS must be greater than 0 when set".into());
    }
    Ok(())
}

pub(super) fn validate_tts_provider(
    config: &ServerConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    match config.tts_provider.as_deref().map(str::to_lowercase).as_deref() {
        None | Some("silent") | Some("none") | Some("log") => Ok(()),
        Some("openai") if config.openai_api_key.is_some() => Ok(()),
        Some("openai") => Err("TTS_PROVIDER is 'openai' but OPENAI_API_KEY is not set".into()),
        Some(other) => Err(format!(
            "Unsupported TTS_PROVIDER '{other}'. Supported providers: openai, silent"
        )
        .into()),
    }
}

pub(super) fn validate_all(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    validate_server(config)?;
    validate_narration(config)?;
    validate_tts_provider(config)?;
    Ok(())
}
