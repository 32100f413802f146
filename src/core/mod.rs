pub mod document;
pub mod llm;
pub mod narration;
pub mod render;
pub mod tts;

// Re-export commonly used types for convenience
pub use document::{EXPORT_FILENAME, ExportError, ExportResult, ExportedDocument, export_pdf};
pub use llm::{GeminiClient, GeminiConfig, GenerationError, GenerationResult, TextGenerator};
pub use narration::{
    ControllerOptions, NarrationConfig, NarrationController, NarrationError, NarrationHandle,
    NarrationState, NarrationStatus, Narrator,
};
pub use render::{clean_for_export, escape_html, render_display_html};
pub use tts::{
    AudioBroadcast, AudioEvent, SpeechSynthesizer, TTSError, TTSResult, VoiceConfig,
    create_synthesizer,
};
