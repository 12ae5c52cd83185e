use serde::{Deserialize, Serialize};

use crate::RoomId;

/// One entry of the public room listing. Private rooms are never listed and
/// no projection carries the password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSummary {
    pub id: RoomId,
    pub chat_only: bool,
    pub is_stream_only: bool,
    pub user_count: usize,
    pub user_name: String,
    pub has_camera: bool,
    pub is_transmitting: bool,
}
