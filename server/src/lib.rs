pub mod error;
pub mod http_api;
pub mod reaper;
pub mod registry;
pub mod room;
pub mod signal_server;
pub mod ws_handler;
