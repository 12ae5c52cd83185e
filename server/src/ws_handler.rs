use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use log::{debug, info};
use shared::join_params::JoinParams;
use shared::message_type::MessageType;
use shared::server_event::ServerEvent;
use tokio::sync::mpsc;

use crate::registry::{Departure, RoomRegistry};
use crate::room::{ConnectionId, PeerSender, RoomInfo};
use crate::signal_server::AppState;

const CREATOR_LEFT_MESSAGE: &str = "the room creator has left";

pub async fn ws_route(
    ws: WebSocketUpgrade,
    Query(params): Query<JoinParams>,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, params, state.registry))
}

async fn handle_socket(socket: WebSocket, params: JoinParams, registry: Arc<RoomRegistry>) {
    let conn: ConnectionId = rand::random();

    let room = match registry.get_or_create(&params, conn).await {
        Ok(room) => room,
        Err(err) => {
            info!("rejected {} from room {}: {}", params.user_name, params.room_id, err);
            reject(socket, &err.to_string()).await;
            return;
        }
    };

    let (tx, mut rx) = mpsc::unbounded_channel();
    if !registry.add_participant(&room.id, conn, tx).await {
        reject(socket, "the room is no longer available").await;
        return;
    }

    info!("{} has joined room {}", params.user_name, room.id);

    let joined = ServerEvent::UserJoined {
        user_name: params.user_name.clone(),
        has_camera: params.has_camera,
        chat_only: room.chat_only,
    };
    registry.broadcast(&room.id, conn, &joined.to_json()).await;

    let (mut sink, mut stream) = socket.split();

    let writer = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if sink.send(message).await.is_err() {
                break;
            }
        }
    });

    while let Some(received) = stream.next().await {
        let message = match received {
            Ok(message) => message,
            Err(_) => break,
        };

        match message {
            Message::Text(text) => relay_message(&registry, &room, conn, text.as_str()).await,
            Message::Binary(_) => {
                debug!("dropping binary frame in room {}", room.id);
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    handle_close(&registry, &room.id, conn, &params.user_name).await;
    info!("{} has left room {}", params.user_name, room.id);

    writer.abort();
}

async fn reject(mut socket: WebSocket, message: &str) {
    let envelope = ServerEvent::Error {
        message: message.to_string(),
    };
    let _ = socket.send(Message::Text(envelope.to_json().into())).await;
    let _ = socket.send(Message::Close(None)).await;
}

/// One inbound payload: toggle transmission when asked to (never in a
/// chat-only room), then forward the raw text to everyone else. Anything
/// that is not JSON is dropped without touching the connection.
pub async fn relay_message(
    registry: &RoomRegistry,
    room: &RoomInfo,
    sender: ConnectionId,
    raw: &str,
) {
    let parsed: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(err) => {
            debug!("dropping malformed message in room {}: {}", room.id, err);
            return;
        }
    };

    let kind = parsed
        .get("type")
        .and_then(serde_json::Value::as_str)
        .and_then(|name| name.parse::<MessageType>().ok());

    match kind {
        Some(MessageType::StartTransmitting) if !room.chat_only => {
            registry.update_transmission(&room.id, true).await;
        }
        Some(MessageType::StopTransmitting) if !room.chat_only => {
            registry.update_transmission(&room.id, false).await;
        }
        _ => {}
    }

    registry.broadcast(&room.id, sender, raw).await;
}

/// The close transition: the creator's exit dissolves the room, an emptied
/// room is dropped quietly, and otherwise the remaining members learn who
/// left.
pub async fn handle_close(
    registry: &RoomRegistry,
    room_id: &str,
    conn: ConnectionId,
    user_name: &str,
) {
    match registry.leave(room_id, conn).await {
        Departure::CreatorLeft { notified } => {
            let envelope = ServerEvent::CreatorLeft {
                message: CREATOR_LEFT_MESSAGE.to_string(),
            };
            send_to_all(&notified, &envelope.to_json());
        }
        Departure::MemberLeft { notified } => {
            let envelope = ServerEvent::UserLeft {
                user_name: user_name.to_string(),
            };
            send_to_all(&notified, &envelope.to_json());
        }
        Departure::RoomEmptied | Departure::NotAMember => {}
    }
}

fn send_to_all(peers: &[PeerSender], payload: &str) {
    for peer in peers {
        let _ = peer.send(Message::Text(payload.to_string().into()));
    }
}
