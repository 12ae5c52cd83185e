use std::collections::HashMap;
use std::time::Instant;

use axum::extract::ws::Message;
use shared::RoomId;
use shared::join_params::JoinParams;
use shared::room_details::RoomDetails;
use shared::room_summary::RoomSummary;
use tokio::sync::mpsc::UnboundedSender;

pub type ConnectionId = u64;

/// Handle through which envelopes reach one participant's socket. Sending
/// never blocks; a send to a closed channel is discarded by the caller.
pub type PeerSender = UnboundedSender<Message>;

pub struct Room {
    pub id: RoomId,
    pub participants: HashMap<ConnectionId, PeerSender>,
    pub creator: ConnectionId,
    pub has_camera: bool,
    pub chat_only: bool,
    pub is_stream_only: bool,
    pub is_private: bool,
    pub password: Option<String>,
    pub is_transmitting: bool,
    pub user_name: String,
    pub created_at: Instant,
}

impl Room {
    pub fn new(params: &JoinParams, creator: ConnectionId) -> Self {
        Self {
            id: params.room_id.clone(),
            participants: HashMap::new(),
            creator,
            has_camera: params.has_camera,
            chat_only: params.chat_only,
            is_stream_only: params.stream_only,
            is_private: params.is_private,
            password: params.password.clone(),
            is_transmitting: params.has_camera && !params.chat_only,
            user_name: params.user_name.clone(),
            created_at: Instant::now(),
        }
    }

    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            id: self.id.clone(),
            chat_only: self.chat_only,
            is_stream_only: self.is_stream_only,
            user_count: self.participants.len(),
            user_name: self.user_name.clone(),
            has_camera: self.has_camera,
            is_transmitting: self.is_transmitting,
        }
    }

    pub fn details(&self) -> RoomDetails {
        RoomDetails {
            id: self.id.clone(),
            is_private: self.is_private,
            user_count: self.participants.len(),
            has_camera: self.has_camera,
            is_transmitting: self.is_transmitting,
            user_name: self.user_name.clone(),
        }
    }

    pub fn info(&self) -> RoomInfo {
        RoomInfo {
            id: self.id.clone(),
            creator: self.creator,
            user_name: self.user_name.clone(),
            has_camera: self.has_camera,
            is_private: self.is_private,
            is_stream_only: self.is_stream_only,
            chat_only: self.chat_only,
            is_transmitting: self.is_transmitting,
        }
    }
}

/// Owned snapshot of a room's metadata, handed to the connection that
/// resolved it. The room itself never leaves the registry.
#[derive(Debug, Clone)]
pub struct RoomInfo {
    pub id: RoomId,
    pub creator: ConnectionId,
    pub user_name: String,
    pub has_camera: bool,
    pub is_private: bool,
    pub is_stream_only: bool,
    pub chat_only: bool,
    pub is_transmitting: bool,
}
