use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::core::llm::{GeminiClient, TextGenerator};
use crate::core::narration::{NarrationController, NarrationHandle};
use crate::core::tts::{AudioBroadcast, SpeechSynthesizer, TTSResult, create_synthesizer};

/// Application state shared by all handlers.
pub struct AppState {
    pub config: ServerConfig,
    /// `None` when no Gemini key is configured
    pub generator: Option<Arc<dyn TextGenerator>>,
    pub narration: NarrationHandle,
    pub audio: AudioBroadcast,
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Build providers from `config` and start the narration controller.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: ServerConfig) -> TTSResult<Arc<Self>> {
        let audio = AudioBroadcast::new();
        let provider = config.tts_provider();
        let synthesizer =
            create_synthesizer(&provider, config.openai_synthesizer_config(), audio.clone())?;

        let generator: Option<Arc<dyn TextGenerator>> = match config.gemini_config() {
            Some(gemini) => match GeminiClient::new(gemini) {
                Ok(client) => Some(Arc::new(client)),
                Err(e) => {
                    warn!(error = %e, "Gemini client unavailable");
                    None
                }
            },
            None => {
                warn!("GEMINI_API_KEY not set, text generation is disabled");
                None
            }
        };

        info!(
            tts_provider = %provider,
            generator = generator.as_ref().map(|g| g.name()).unwrap_or("none"),
            "Application state initialised"
        );

        Ok(Self::from_parts(config, generator, synthesizer, audio))
    }

    /// Assemble state from already-built providers.
    pub fn from_parts(
        config: ServerConfig,
        generator: Option<Arc<dyn TextGenerator>>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        audio: AudioBroadcast,
    ) -> Arc<Self> {
        let shutdown = CancellationToken::new();
        let narration = NarrationController::spawn(
            config.narration_config(),
            config.controller_options(),
            synthesizer,
            shutdown.child_token(),
        );

        Arc::new(Self {
            config,
            generator,
            narration,
            audio,
            shutdown,
        })
    }
}
