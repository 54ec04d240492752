//! Chat relay handlers.
//!
//! A thin WebSocket relay: every logged-in customer shares one room.
//! Inbound frames are persisted and broadcast to all connected sockets,
//! including the sender. There are no rooms and no presence tracking.

use axum::{
    Json,
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::db::chat::ChatRepository;
use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::models::CurrentCustomer;
use crate::models::chat::ChatMessage;
use crate::state::AppState;

/// How many messages `GET /api/chat/history` returns.
const HISTORY_LIMIT: i64 = 50;

/// An inbound chat frame from a client.
#[derive(Debug, Deserialize)]
struct InboundMessage {
    body: String,
}

/// Upgrade to a WebSocket and join the chat relay.
pub async fn ws(
    State(state): State<AppState>,
    RequireAuth(customer): RequireAuth,
    upgrade: WebSocketUpgrade,
) -> Response {
    upgrade.on_upgrade(move |socket| handle_socket(socket, state, customer))
}

/// List recent chat messages in chronological order.
pub async fn history(
    State(state): State<AppState>,
    RequireAuth(_customer): RequireAuth,
) -> Result<Json<Vec<ChatMessage>>> {
    let messages = ChatRepository::new(state.pool())
        .recent(HISTORY_LIMIT)
        .await?;

    Ok(Json(messages))
}

async fn handle_socket(socket: WebSocket, state: AppState, customer: CurrentCustomer) {
    let (mut sink, mut stream) = socket.split();
    let mut subscriber = state.chat().subscribe();

    // Outbound: broadcast channel -> socket
    let mut send_task = tokio::spawn(async move {
        loop {
            match subscriber.recv().await {
                Ok(message) => {
                    let Ok(json) = serde_json::to_string(&message) else {
                        continue;
                    };
                    if sink.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                // A slow socket misses messages rather than stalling the hub
                Err(RecvError::Lagged(skipped)) => {
                    debug!(skipped, "chat subscriber lagged");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // Inbound: socket -> persist -> broadcast channel
    let sender = customer.email.as_str().to_owned();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(frame)) = stream.next().await {
            match frame {
                Message::Text(text) => {
                    let Ok(inbound) = serde_json::from_str::<InboundMessage>(&text) else {
                        debug!("dropping unparseable chat frame");
                        continue;
                    };
                    let body = inbound.body.trim();
                    if body.is_empty() {
                        continue;
                    }

                    match ChatRepository::new(state.pool()).insert(&sender, body).await {
                        Ok(message) => state.chat().publish(message),
                        Err(err) => {
                            warn!(error = %err, "failed to persist chat message");
                        }
                    }
                }
                Message::Close(_) => break,
                Message::Binary(_) | Message::Ping(_) | Message::Pong(_) => {}
            }
        }
    });

    // Whichever side finishes first tears down the other
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }
}
