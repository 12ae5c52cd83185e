pub mod join_params;
pub mod message_type;
pub mod room_details;
pub mod room_summary;
pub mod server_event;

pub type RoomId = String;

pub const DEFAULT_PORT: u16 = 8000;

pub const DEFAULT_USER_NAME: &str = "Anonymous";
