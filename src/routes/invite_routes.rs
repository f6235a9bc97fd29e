use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::invite_dto::{
    BulkDispatchPayload, BulkDispatchResponse, CreateInvitePayload, InviteListQuery,
    InviteListResponse, InviteResponse, IssueInviteResponse,
};
use crate::error::Result;
use crate::utils::pagination::page_bounds;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/integration/invites",
    request_body = CreateInvitePayload,
    responses(
        (status = 201, description = "Invite issued; the access token appears only in this response"),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_invite(
    State(state): State<AppState>,
    Json(payload): Json<CreateInvitePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let issued = state
        .invite_service
        .issue(
            payload.candidate_id,
            payload.job_id,
            payload.expires_at,
            payload.interview_start_time,
            payload.metadata,
        )
        .await?;
    let response = IssueInviteResponse {
        invite: InviteResponse::from(issued.invite),
        access_token: issued.access_token,
        checkin_token: issued.checkin_token,
    };
    Ok((StatusCode::CREATED, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/integration/invites/bulk",
    request_body = BulkDispatchPayload,
    responses(
        (status = 200, description = "Dispatch report", body = Json<BulkDispatchResponse>)
    )
)]
#[axum::debug_handler]
pub async fn bulk_dispatch(
    State(state): State<AppState>,
    Json(payload): Json<BulkDispatchPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let report = state.invite_service.bulk_dispatch(payload).await?;
    Ok(Json(report))
}

#[utoipa::path(
    post,
    path = "/api/integration/invites/{id}/send",
    params(("id" = Uuid, Path, description = "Invite ID")),
    responses(
        (status = 200, description = "Invite marked sent"),
        (status = 409, description = "Invite is not pending")
    )
)]
#[axum::debug_handler]
pub async fn mark_sent(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let invite = state.invite_service.mark_sent(id).await?;
    Ok(Json(InviteResponse::from(invite)))
}

#[utoipa::path(
    post,
    path = "/api/integration/invites/{id}/revoke",
    params(("id" = Uuid, Path, description = "Invite ID")),
    responses(
        (status = 200, description = "Invite revoked"),
        (status = 409, description = "Invite is already terminal")
    )
)]
#[axum::debug_handler]
pub async fn revoke_invite(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let invite = state.invite_service.revoke(id).await?;
    Ok(Json(InviteResponse::from(invite)))
}

#[axum::debug_handler]
pub async fn get_invite(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let invite = state.invite_service.get_by_id(id).await?;
    Ok(Json(InviteResponse::from(invite)))
}

#[axum::debug_handler]
pub async fn list_invites(
    State(state): State<AppState>,
    Query(query): Query<InviteListQuery>,
) -> Result<impl IntoResponse> {
    let (page, per_page, _) = page_bounds(query.page, query.per_page);
    let (items, total) = state.invite_service.list(query).await?;
    Ok(Json(InviteListResponse {
        items: items.into_iter().map(InviteResponse::from).collect(),
        total,
        page,
        per_page,
    }))
}

#[axum::debug_handler]
pub async fn delete_invite(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.invite_service.delete_pending(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
