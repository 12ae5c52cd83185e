use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use shared::room_summary::RoomSummary;

use crate::error::RegistryError;
use crate::signal_server::AppState;

/// The read path of the in-memory registry cannot fail, so the
/// 5xx-with-empty-array contract for this route has no reachable trigger.
pub async fn list_rooms(State(state): State<AppState>) -> Json<Vec<RoomSummary>> {
    Json(state.registry.list().await)
}

pub async fn room_details(Path(id): Path<String>, State(state): State<AppState>) -> Response {
    match state.registry.details(&id).await {
        Some(details) => Json(details).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "room not found",
                "message": "waiting for the creator to start the room",
            })),
        )
            .into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub password: Option<String>,
}

pub async fn verify_room(
    Path(id): Path<String>,
    State(state): State<AppState>,
    body: Result<Json<VerifyRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(request)) = body else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid request body" })),
        )
            .into_response();
    };

    match state
        .registry
        .verify_password(&id, request.password.as_deref())
        .await
    {
        Ok(true) => Json(json!({ "success": true })).into_response(),
        Ok(false) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": RegistryError::WrongPassword.to_string() })),
        )
            .into_response(),
        Err(err) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339(),
        "uptime": state.started_at.elapsed().as_secs_f64(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::RoomRegistry;
    use shared::join_params::JoinParams;
    use std::sync::Arc;
    use std::time::Instant;

    fn state() -> AppState {
        AppState {
            registry: Arc::new(RoomRegistry::new()),
            started_at: Instant::now(),
        }
    }

    fn private_params(id: &str, password: &str) -> JoinParams {
        let mut params = JoinParams::new(id);
        params.is_private = true;
        params.password = Some(password.to_string());
        params
    }

    #[tokio::test]
    async fn listing_is_empty_for_a_fresh_registry() {
        let Json(listed) = list_rooms(State(state())).await;
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn unknown_room_details_is_a_404() {
        let response = room_details(Path("missing".to_string()), State(state())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn known_room_details_is_a_200() {
        let state = state();
        state
            .registry
            .create(&JoinParams::new("garden"), 1)
            .await
            .unwrap();

        let response = room_details(Path("garden".to_string()), State(state)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn verify_accepts_public_rooms_without_a_password() {
        let state = state();
        state
            .registry
            .create(&JoinParams::new("open"), 1)
            .await
            .unwrap();

        let body = Ok(Json(VerifyRequest { password: None }));
        let response = verify_room(Path("open".to_string()), State(state), body).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn verify_rejects_a_wrong_password_with_401() {
        let state = state();
        state
            .registry
            .create(&private_params("vault", "p"), 1)
            .await
            .unwrap();

        let body = Ok(Json(VerifyRequest {
            password: Some("nope".to_string()),
        }));
        let response = verify_room(Path("vault".to_string()), State(state), body).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn verify_on_a_missing_room_is_a_404() {
        let body = Ok(Json(VerifyRequest { password: None }));
        let response = verify_room(Path("missing".to_string()), State(state()), body).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
