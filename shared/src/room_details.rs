use serde::{Deserialize, Serialize};

use crate::RoomId;

/// Public view of a single room, served to joiners checking a room before
/// connecting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomDetails {
    pub id: RoomId,
    pub is_private: bool,
    pub user_count: usize,
    pub has_camera: bool,
    pub is_transmitting: bool,
    pub user_name: String,
}
