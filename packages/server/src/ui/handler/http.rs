//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};
use chaguan_shared::time::timestamp_to_cst_rfc3339;

use crate::{
    infrastructure::dto::http::{CheckUsernameRequest, CheckUsernameResponse, MemberDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Advisory name availability check, used before joining
pub async fn check_username(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CheckUsernameRequest>,
) -> Json<CheckUsernameResponse> {
    let available = state.check_username().execute(request.username).await;
    Json(CheckUsernameResponse { available })
}

/// Current members in join order
pub async fn list_users(State(state): State<Arc<AppState>>) -> Json<Vec<MemberDto>> {
    let members = state
        .repository
        .sessions()
        .await
        .into_iter()
        .map(|s| MemberDto {
            username: s.name.into_string(),
            joined_at: timestamp_to_cst_rfc3339(s.joined_at.value()),
        })
        .collect();

    Json(members)
}
