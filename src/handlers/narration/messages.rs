use serde::Serialize;

use crate::core::narration::NarrationStatus;

/// Text frames sent to audio listeners. PCM itself travels as binary frames.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AudioOutgoingMessage {
    /// First frame on every connection
    Ready {
        synthesizer: String,
        sample_rate: u32,
    },
    /// Narration state changed
    Status {
        #[serde(flatten)]
        status: NarrationStatus,
    },
    /// Discard any queued audio
    Stop,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::narration::NarrationState;
    use serde_json::json;

    #[test]
    fn test_stop_message() {
        assert_eq!(
            serde_json::to_value(AudioOutgoingMessage::Stop).unwrap(),
            json!({"type": "stop"})
        );
    }

    #[test]
    fn test_status_message_is_flat() {
        let status = NarrationStatus {
            state: NarrationState::Paused,
            cursor: 1500,
            total: 3200,
            chunks_spoken: 1,
            chunks_total: 3,
            ..Default::default()
        };
        let value = serde_json::to_value(AudioOutgoingMessage::Status { status }).unwrap();
        assert_eq!(value["type"], "status");
        assert_eq!(value["state"], "paused");
        assert_eq!(value["cursor"], 1500);
        assert_eq!(value["session_id"], serde_json::Value::Null);
    }

    #[test]
    fn test_ready_message() {
        let value = serde_json::to_value(AudioOutgoingMessage::Ready {
            synthesizer: "openai".to_string(),
            sample_rate: 24000,
        })
        .unwrap();
        assert_eq!(
            value,
            json!({"type": "ready", "synthesizer": "openai", "sample_rate": 24000})
        );
    }
}
