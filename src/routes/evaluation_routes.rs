use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::evaluation_dto::RecordEvaluationPayload;
use crate::error::Result;
use crate::middleware::auth::Claims;
use crate::AppState;

/// The evaluator identity comes from the verified bearer claims, passed
/// down explicitly; it is never taken from the payload.
#[axum::debug_handler]
pub async fn record_evaluation(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<RecordEvaluationPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let evaluator_id = claims.user_id()?;
    let evaluation = state
        .evaluation_service
        .record(application_id, evaluator_id, payload)
        .await?;
    Ok((StatusCode::CREATED, Json(evaluation)))
}

#[axum::debug_handler]
pub async fn list_evaluations(
    State(state): State<AppState>,
    Path(application_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let evaluations = state
        .evaluation_service
        .list_for_application(application_id)
        .await?;
    Ok(Json(evaluations))
}
