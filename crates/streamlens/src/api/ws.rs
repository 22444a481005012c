//! WebSocket event feed

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use streamlens_api::events::CatalogEvent;

use crate::state::AppState;

/// Upgrade to a WebSocket streaming catalog events as JSON text frames
pub async fn events_ws(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let rx = state.events.subscribe();
    ws.on_upgrade(move |socket| stream_events(socket, rx))
}

async fn stream_events(mut socket: WebSocket, mut rx: broadcast::Receiver<CatalogEvent>) {
    debug!("event stream subscriber connected");

    loop {
        match rx.recv().await {
            Ok(event) => {
                let Ok(text) = serde_json::to_string(&event) else {
                    continue;
                };
                if socket.send(Message::Text(text.into())).await.is_err() {
                    // Client went away
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "event stream subscriber lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }

    debug!("event stream subscriber disconnected");
}
