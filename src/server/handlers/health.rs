use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{json, Value};
use tracing::error;

use crate::server::app::AppState;

/// Reports whether the layout table is reachable and how many rows it holds.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.layout.count_components().await {
        Ok(components) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "service": "greenhouse-layout",
                "version": env!("CARGO_PKG_VERSION"),
                "components": components,
            })),
        ),
        Err(e) => {
            error!("Health check could not reach the layout table: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "unavailable",
                    "service": "greenhouse-layout",
                    "version": env!("CARGO_PKG_VERSION"),
                })),
            )
        }
    }
}
