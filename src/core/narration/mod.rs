//! Chunked, resumable read-aloud narration.
//!
//! [`Narrator`] is the synchronous state machine: it decides which chunk to
//! speak next and which in-flight call to cancel. [`NarrationController`] runs
//! it as an actor on tokio and drives a [`SpeechSynthesizer`](crate::core::tts::SpeechSynthesizer).

mod controller;
mod filter;
mod session;

pub use controller::{
    ControllerOptions, NarrationController, NarrationError, NarrationHandle, NarrationResult,
};
pub use filter::strip_narration_noise;
pub use session::{
    ChunkTicket, CompletionOutcome, DEFAULT_CHUNK_SIZE, Effects, NarrationConfig,
    NarrationSession, NarrationState, NarrationStatus, Narrator, SessionId, SpeakRequest,
};
