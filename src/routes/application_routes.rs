use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::application_dto::{
    ApplicationListQuery, ApplicationResponse, UpdateApplicationStatusPayload,
};
use crate::error::Result;
use crate::AppState;

#[axum::debug_handler]
pub async fn list_applications(
    State(state): State<AppState>,
    Query(query): Query<ApplicationListQuery>,
) -> Result<impl IntoResponse> {
    let (items, total) = state.application_service.list(query).await?;
    let items: Vec<ApplicationResponse> =
        items.into_iter().map(ApplicationResponse::from).collect();
    Ok(Json(serde_json::json!({ "items": items, "total": total })))
}

/// Full record including the submitted form payload; staff-only surface.
#[axum::debug_handler]
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let application = state.application_service.get_by_id(id).await?;
    Ok(Json(application))
}

#[axum::debug_handler]
pub async fn update_application_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateApplicationStatusPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let application = state
        .application_service
        .update_status(id, &payload.status)
        .await?;
    Ok(Json(ApplicationResponse::from(application)))
}
