use serde::{Deserialize, Serialize};

use crate::{DEFAULT_USER_NAME, RoomId};

/// Parameters a participant supplies when opening a signaling connection,
/// conveyed as URL query parameters on the upgrade request. Everything but
/// `roomId` has a default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinParams {
    pub room_id: RoomId,
    #[serde(default)]
    pub has_camera: bool,
    #[serde(default = "default_user_name")]
    pub user_name: String,
    #[serde(default)]
    pub is_private: bool,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub chat_only: bool,
    #[serde(default)]
    pub stream_only: bool,
}

fn default_user_name() -> String {
    DEFAULT_USER_NAME.to_string()
}

impl JoinParams {
    pub fn new(room_id: impl Into<RoomId>) -> Self {
        Self {
            room_id: room_id.into(),
            has_camera: false,
            user_name: default_user_name(),
            is_private: false,
            password: None,
            chat_only: false,
            stream_only: false,
        }
    }
}
