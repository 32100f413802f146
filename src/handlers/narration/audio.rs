use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::select;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use super::messages::AudioOutgoingMessage;
use crate::core::tts::{AudioEvent, openai::PCM_SAMPLE_RATE};
use crate::state::AppState;

/// Maximum inbound message size; listeners only ever send control frames
const MAX_WS_MESSAGE_SIZE: usize = 64 * 1024;

/// Audio listener WebSocket.
///
/// Sends a `ready` frame, then binary PCM for every synthesized chunk, a
/// `stop` frame whenever narration is interrupted, and a `status` frame on
/// every narration state change.
pub async fn narration_audio_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    debug!("Narration audio WebSocket upgrade requested");
    ws.max_message_size(MAX_WS_MESSAGE_SIZE)
        .on_upgrade(move |socket| handle_audio_socket(socket, state))
}

fn text_frame(message: &AudioOutgoingMessage) -> Option<Message> {
    serde_json::to_string(message)
        .map(|json| Message::Text(json.into()))
        .ok()
}

async fn handle_audio_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut audio = state.audio.subscribe();
    let mut status = state.narration.subscribe();
    info!(
        listeners = state.audio.listener_count(),
        "Narration audio listener connected"
    );

    let ready = AudioOutgoingMessage::Ready {
        synthesizer: state.narration.synthesizer_name().to_string(),
        sample_rate: PCM_SAMPLE_RATE,
    };
    let current = AudioOutgoingMessage::Status {
        status: status.borrow_and_update().clone(),
    };
    for message in [ready, current] {
        if let Some(frame) = text_frame(&message)
            && sender.send(frame).await.is_err()
        {
            return;
        }
    }

    loop {
        let frame = select! {
            _ = state.shutdown.cancelled() => break,
            event = audio.recv() => match event {
                Ok(AudioEvent::Chunk { data, .. }) => Some(Message::Binary(data)),
                Ok(AudioEvent::Stop) => text_frame(&AudioOutgoingMessage::Stop),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Audio listener lagging, chunks dropped");
                    None
                }
                Err(RecvError::Closed) => break,
            },
            changed = status.changed() => match changed {
                Ok(()) => {
                    let snapshot = status.borrow_and_update().clone();
                    text_frame(&AudioOutgoingMessage::Status { status: snapshot })
                }
                Err(_) => break,
            },
            incoming = receiver.next() => match incoming {
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => None,
                Some(Err(e)) => {
                    warn!(error = %e, "Narration audio WebSocket error");
                    break;
                }
            },
        };

        if let Some(frame) = frame
            && let Err(e) = sender.send(frame).await
        {
            debug!(error = %e, "Audio listener send failed");
            break;
        }
    }

    let _ = sender.send(Message::Close(None)).await;
    info!("Narration audio listener disconnected");
}
