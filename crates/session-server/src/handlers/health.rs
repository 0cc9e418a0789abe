use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use session_core::StoreStats;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
    sessions: StoreStats,
}

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let status = if state.store.is_closed() { "closing" } else { "healthy" };
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            sessions: state.store.stats(),
        }),
    )
}
