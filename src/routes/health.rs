use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::AppState;

/// Liveness plus a database probe, so the load balancer stops routing to an
/// instance that lost its pool.
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let database_up = sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.pool)
        .await
        .is_ok();

    let status = if database_up {
        StatusCode::OK
    } else {
        tracing::error!("health probe could not reach the database");
        StatusCode::SERVICE_UNAVAILABLE
    };

    let body = json!({
        "status": if database_up { "ok" } else { "degraded" },
        "database": if database_up { "up" } else { "down" },
        "version": env!("CARGO_PKG_VERSION"),
    });
    (status, Json(body))
}
