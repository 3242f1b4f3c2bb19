// Observer WebSocket: one subscription to the stream hub per connection,
// every broadcast message forwarded as JSON text.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use uuid::Uuid;

use backend_application::AppState;

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn observe(
    State(state): State<AppState>,
    headers: HeaderMap,
    ws: WebSocketUpgrade,
) -> Response {
    if !authorize(&state.config, &headers) {
        return HttpError::Unauthorized.into_response();
    }
    ws.on_upgrade(move |socket| stream_messages(state, socket))
}

async fn stream_messages(state: AppState, socket: WebSocket) {
    let connection_id = Uuid::new_v4();
    info!("observer {connection_id} connected");

    let (mut sink, mut source) = socket.split();
    let mut messages = state.hub.subscribe();
    loop {
        tokio::select! {
            message = messages.recv() => match message {
                Ok(message) => {
                    let Ok(text) = serde_json::to_string(&message) else {
                        continue;
                    };
                    if sink.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(dropped)) => {
                    warn!("observer {connection_id} lagged, dropped {dropped} messages");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = source.next() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }
    info!("observer {connection_id} disconnected");
}
