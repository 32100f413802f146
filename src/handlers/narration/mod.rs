//! Narration control and audio streaming.
//!
//! - `POST /api/narration/toggle` - play/pause for a text
//! - `POST /api/narration/stop` - abandon the current session
//! - `GET /api/narration` - current status
//! - `GET /api/narration/audio` - WebSocket carrying PCM and control messages

mod audio;
mod control;
mod messages;

pub use audio::narration_audio_handler;
pub use control::{ToggleRequest, narration_status, stop_narration, toggle_narration};
pub use messages::AudioOutgoingMessage;
