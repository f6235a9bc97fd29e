use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::dto::application_dto::{ApplicationForm, ApplicationResponse};
use crate::dto::public_dto::{
    ApplicationContextResponse, CheckInQuery, CheckInResponse, PublicCandidateSummary,
    PublicInviteSummary, PublicJobSummary,
};
use crate::services::checkin::CheckInCode;
use crate::AppState;

/// Candidate follows the invite link: resolves the token, records the open
/// (idempotent) and returns what the form page needs to render.
#[axum::debug_handler]
pub async fn get_application_context(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> crate::error::Result<Response> {
    let invite = state.invite_service.mark_opened(&token).await?;

    let candidate = state.candidate_service.get_by_id(invite.candidate_id).await?;
    let job = match invite.job_id {
        Some(job_id) => Some(state.job_service.get_by_id(job_id).await?),
        None => None,
    };

    let response = ApplicationContextResponse {
        invite: PublicInviteSummary {
            status: invite.status,
            expires_at: invite.expires_at,
            interview_start_time: invite.interview_start_time,
            opened_at: invite.opened_at,
            submitted_at: invite.submitted_at,
        },
        candidate: PublicCandidateSummary {
            name: candidate.name,
            email: candidate.email,
        },
        job: job.map(|job| PublicJobSummary {
            title: job.title,
            department: job.department,
            job_type: job.job_type,
            deadline: job.deadline,
        }),
    };
    Ok(Json(response).into_response())
}

#[axum::debug_handler]
pub async fn submit_application(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(form): Json<ApplicationForm>,
) -> crate::error::Result<Response> {
    let application = state.application_service.submit(&token, form).await?;
    Ok((StatusCode::CREATED, Json(ApplicationResponse::from(application))).into_response())
}

/// Arrival confirmation endpoint for the interview kiosk. Always answers
/// 200 with {statusCode, message}; persistence failures surface as
/// server_error with the detail logged, never exposed.
#[axum::debug_handler]
pub async fn check_in(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(query): Query<CheckInQuery>,
) -> Json<CheckInResponse> {
    match state
        .invite_service
        .check_in(&token, query.latitude, query.longitude)
        .await
    {
        Ok(response) => Json(response),
        Err(e) => {
            tracing::error!(error = ?e, "check-in failed");
            Json(CheckInResponse::from_code(CheckInCode::ServerError))
        }
    }
}

#[axum::debug_handler]
pub async fn list_public_jobs(
    State(state): State<AppState>,
) -> crate::error::Result<Response> {
    let jobs = state.job_service.list_public().await?;
    Ok(Json(jobs).into_response())
}

#[axum::debug_handler]
pub async fn get_public_job(
    State(state): State<AppState>,
    Path(id): Path<uuid::Uuid>,
) -> crate::error::Result<Response> {
    let job = state.job_service.get_by_id(id).await?;
    if job.status != "active" {
        return Err(crate::error::Error::NotFound("Job not found".to_string()));
    }
    Ok(Json(job).into_response())
}
