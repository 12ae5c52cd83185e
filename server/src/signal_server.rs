use core::error::Error;
use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::routing::{get, post};
use tokio::net::TcpListener;

use crate::http_api;
use crate::reaper::{MAX_ROOM_AGE, SWEEP_INTERVAL, RoomReaper};
use crate::registry::RoomRegistry;
use crate::ws_handler;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<RoomRegistry>,
    pub started_at: Instant,
}

pub struct SignalServer {
    listener: TcpListener,
    state: AppState,
}

impl SignalServer {
    pub async fn bind(addr: String) -> Result<Self, Box<dyn Error>> {
        Ok(Self {
            listener: TcpListener::bind(addr).await?,
            state: AppState {
                registry: Arc::new(RoomRegistry::new()),
                started_at: Instant::now(),
            },
        })
    }

    pub async fn listen(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        tokio::spawn(RoomReaper::run(
            self.state.registry.clone(),
            SWEEP_INTERVAL,
            MAX_ROOM_AGE,
        ));

        let router = Router::new()
            .route("/ws", get(ws_handler::ws_route))
            .route("/rooms", get(http_api::list_rooms))
            .route("/rooms/{id}", get(http_api::room_details))
            .route("/rooms/{id}/verify", post(http_api::verify_room))
            .route("/health", get(http_api::health))
            .with_state(self.state);

        axum::serve(self.listener, router).await?;

        Ok(())
    }
}
