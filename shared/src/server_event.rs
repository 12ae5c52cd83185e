use serde::{Deserialize, Serialize};

/// The envelopes the server itself puts on the wire. Everything else on the
/// signaling channel is relayed verbatim without being represented here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ServerEvent {
    UserJoined {
        user_name: String,
        has_camera: bool,
        chat_only: bool,
    },
    UserLeft {
        user_name: String,
    },
    CreatorLeft {
        message: String,
    },
    Error {
        message: String,
    },
}

impl ServerEvent {
    /// Wire form of the envelope. Serialization of these variants cannot
    /// fail, so this returns the JSON text directly.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
