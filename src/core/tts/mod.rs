mod base;
pub mod openai;
pub mod silent;

pub use base::{
    AudioBroadcast, AudioEvent, DEFAULT_RATE, DEFAULT_VOICE, SpeechSynthesizer, TTSError,
    TTSResult, VoiceConfig,
};
pub use openai::{OpenAISynthesizer, OpenAISynthesizerConfig, OpenAITTSModel, OpenAIVoice};
pub use silent::SilentSynthesizer;

use std::sync::Arc;

/// Factory function to create a speech synthesizer.
///
/// # Supported Providers
///
/// - `"openai"` - OpenAI Audio Speech API (requires `openai` settings)
/// - `"silent"` or `"none"` or `"log"` - log-only synthesizer with paced chunks
pub fn create_synthesizer(
    provider_type: &str,
    openai: Option<OpenAISynthesizerConfig>,
    audio: AudioBroadcast,
) -> TTSResult<Arc<dyn SpeechSynthesizer>> {
    match provider_type.to_lowercase().as_str() {
        "openai" => {
            let config = openai.ok_or_else(|| {
                TTSError::InvalidConfiguration(
                    "OpenAI API key not configured in server environment".to_string(),
                )
            })?;
            Ok(Arc::new(OpenAISynthesizer::new(config, audio)?))
        }
        "silent" | "none" | "log" => Ok(Arc::new(SilentSynthesizer::new())),
        _ => Err(TTSError::InvalidConfiguration(format!(
            "Unsupported TTS provider: {provider_type}. Supported providers: openai, silent"
        ))),
    }
}
