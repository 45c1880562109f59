use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    Json,
};
use serde::Serialize;

use crate::stream::{Frame, StreamBridge, Subscription};
use crate::web::state::StreamState;

#[derive(Debug, Serialize)]
pub struct StreamStatus {
    pub active_subscribers: usize,
    pub total_points: usize,
    pub source: String,
}

/// Upgrades to a WebSocket and starts streaming immediately.
pub async fn subscribe(ws: WebSocketUpgrade, State(state): State<StreamState>) -> Response {
    ws.on_upgrade(move |socket| forward_frames(socket, state.bridge))
}

pub async fn status(State(state): State<StreamState>) -> Json<StreamStatus> {
    let trajectory = state.bridge.trajectory();
    Json(StreamStatus {
        active_subscribers: state.bridge.active_subscribers(),
        total_points: trajectory.len(),
        source: trajectory.origin().to_string(),
    })
}

async fn forward_frames(mut socket: WebSocket, bridge: StreamBridge) {
    let Subscription {
        id,
        mut frames,
        task,
    } = bridge.subscribe();

    loop {
        tokio::select! {
            frame = frames.recv() => match frame {
                Some(text) => {
                    if let Err(e) = socket.send(Message::Text(text.into())).await {
                        log::debug!("Send to {} failed: {}", id, e);
                        return;
                    }
                }
                None => break,
            },
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => return,
                Some(Ok(_)) => {}
            },
        }
    }

    // The session ended on its own; a panic still owes the client an error frame.
    if let Err(e) = task.await {
        log::error!("Stream session {} aborted: {}", id, e);
        if let Ok(text) = Frame::error("stream session aborted").encode() {
            let _ = socket.send(Message::Text(text.into())).await;
        }
    }
    let _ = socket.send(Message::Close(None)).await;
}
