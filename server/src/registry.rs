use std::collections::HashMap;
use std::time::Duration;

use axum::extract::ws::Message;
use shared::RoomId;
use shared::join_params::JoinParams;
use shared::room_details::RoomDetails;
use shared::room_summary::RoomSummary;
use tokio::sync::RwLock;

use crate::error::RegistryError;
use crate::room::{ConnectionId, PeerSender, Room, RoomInfo};

/// How a connection's departure resolved. Sender snapshots are taken under
/// the registry lock, so notifying them afterwards cannot race a concurrent
/// membership change.
#[derive(Debug)]
pub enum Departure {
    /// The creator left; the room is gone and everyone remaining is told.
    CreatorLeft { notified: Vec<PeerSender> },
    /// The last participant left; the room is gone, nobody to tell.
    RoomEmptied,
    /// An ordinary member left; the room stays.
    MemberLeft { notified: Vec<PeerSender> },
    /// The room or the participant was already gone.
    NotAMember,
}

/// The room directory behind a single lock. One instance is created at
/// process start and shared by the relay, the reaper, and the HTTP handlers.
pub struct RoomRegistry {
    rooms: RwLock<HashMap<RoomId, Room>>,
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Strict creation: fails if the id is taken. Idempotent joins should go
    /// through [`get_or_create`](Self::get_or_create) instead.
    pub async fn create(
        &self,
        params: &JoinParams,
        creator: ConnectionId,
    ) -> Result<RoomInfo, RegistryError> {
        let mut rooms = self.rooms.write().await;

        if rooms.contains_key(&params.room_id) {
            return Err(RegistryError::DuplicateRoom(params.room_id.clone()));
        }

        Self::insert_room(&mut rooms, params, creator)
    }

    /// Resolves `params.room_id` to an existing room, checking the password
    /// if the room is private, or creates it with `conn` as creator. An
    /// existing room is returned unchanged: the caller's name and flags do
    /// not overwrite the room's original metadata.
    pub async fn get_or_create(
        &self,
        params: &JoinParams,
        conn: ConnectionId,
    ) -> Result<RoomInfo, RegistryError> {
        let mut rooms = self.rooms.write().await;

        match rooms.get(&params.room_id) {
            Some(room) => {
                if !password_matches(room, params.password.as_deref()) {
                    return Err(RegistryError::WrongPassword);
                }
                Ok(room.info())
            }
            None => Self::insert_room(&mut rooms, params, conn),
        }
    }

    fn insert_room(
        rooms: &mut HashMap<RoomId, Room>,
        params: &JoinParams,
        creator: ConnectionId,
    ) -> Result<RoomInfo, RegistryError> {
        if params.is_private && params.password.as_deref().is_none_or(str::is_empty) {
            return Err(RegistryError::MissingPassword);
        }

        let room = Room::new(params, creator);
        let info = room.info();
        rooms.insert(room.id.clone(), room);

        Ok(info)
    }

    /// Registers a participant's outbound channel with its room. Returns
    /// false if the room vanished since it was resolved.
    pub async fn add_participant(
        &self,
        id: &str,
        conn: ConnectionId,
        sender: PeerSender,
    ) -> bool {
        let mut rooms = self.rooms.write().await;

        match rooms.get_mut(id) {
            Some(room) => {
                room.participants.insert(conn, sender);
                true
            }
            None => false,
        }
    }

    /// Removes a participant and resolves the close transition in one
    /// critical section: the creator's departure or an emptied room deletes
    /// the room; otherwise the remaining members get told who left.
    pub async fn leave(&self, id: &str, conn: ConnectionId) -> Departure {
        let mut rooms = self.rooms.write().await;

        let departure = match rooms.get_mut(id) {
            None => return Departure::NotAMember,
            Some(room) => {
                if room.participants.remove(&conn).is_none() {
                    return Departure::NotAMember;
                }

                if room.creator == conn {
                    Departure::CreatorLeft {
                        notified: room.participants.values().cloned().collect(),
                    }
                } else if room.participants.is_empty() {
                    room.is_transmitting = false;
                    Departure::RoomEmptied
                } else {
                    Departure::MemberLeft {
                        notified: room.participants.values().cloned().collect(),
                    }
                }
            }
        };

        if matches!(
            departure,
            Departure::CreatorLeft { .. } | Departure::RoomEmptied
        ) {
            rooms.remove(id);
        }

        departure
    }

    /// Public rooms only; the password is not part of any projection.
    pub async fn list(&self) -> Vec<RoomSummary> {
        let rooms = self.rooms.read().await;

        rooms
            .values()
            .filter(|room| !room.is_private)
            .map(Room::summary)
            .collect()
    }

    pub async fn details(&self, id: &str) -> Option<RoomDetails> {
        let rooms = self.rooms.read().await;
        rooms.get(id).map(Room::details)
    }

    pub async fn remove(&self, id: &str) {
        let mut rooms = self.rooms.write().await;
        rooms.remove(id);
    }

    /// No-op when the room is absent. Callers keep this away from chat-only
    /// rooms; the flag itself is set unconditionally.
    pub async fn update_transmission(&self, id: &str, is_transmitting: bool) {
        let mut rooms = self.rooms.write().await;

        if let Some(room) = rooms.get_mut(id) {
            room.is_transmitting = is_transmitting;
        }
    }

    /// True for public rooms regardless of the supplied password; for
    /// private rooms only on an exact match. The signaling join path and the
    /// HTTP verify endpoint both resolve through this check.
    pub async fn verify_password(
        &self,
        id: &str,
        password: Option<&str>,
    ) -> Result<bool, RegistryError> {
        let rooms = self.rooms.read().await;
        let room = rooms
            .get(id)
            .ok_or_else(|| RegistryError::RoomNotFound(id.to_string()))?;

        Ok(password_matches(room, password))
    }

    /// Forwards `payload` to every participant of the room except `exclude`.
    /// Closed channels are skipped; an absent room is a no-op.
    pub async fn broadcast(&self, id: &str, exclude: ConnectionId, payload: &str) {
        let rooms = self.rooms.read().await;

        if let Some(room) = rooms.get(id) {
            for (conn, sender) in &room.participants {
                if *conn != exclude {
                    let _ = sender.send(Message::Text(payload.to_string().into()));
                }
            }
        }
    }

    /// Deletes every room older than `max_age` or with no participants.
    /// Returns how many were deleted.
    pub async fn sweep(&self, max_age: Duration) -> usize {
        let mut rooms = self.rooms.write().await;
        let before = rooms.len();

        rooms.retain(|_, room| {
            room.created_at.elapsed() <= max_age && !room.participants.is_empty()
        });

        before - rooms.len()
    }
}

fn password_matches(room: &Room, supplied: Option<&str>) -> bool {
    if !room.is_private {
        return true;
    }

    match (room.password.as_deref(), supplied) {
        (Some(stored), Some(given)) => stored == given,
        _ => false,
    }
}
