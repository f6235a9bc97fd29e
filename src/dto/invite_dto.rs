use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;
use validator::Validate;

use crate::models::invite::Invite;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateInvitePayload {
    pub candidate_id: Uuid,
    pub job_id: Option<Uuid>,
    pub expires_at: DateTime<Utc>,
    pub interview_start_time: Option<DateTime<Utc>>,
    pub metadata: Option<JsonValue>,
}

/// Bulk dispatch contract: one invite per candidate, all marked sent.
/// Actual delivery (email/link transport) is an external collaborator.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BulkDispatchPayload {
    #[validate(length(min = 1, message = "At least one candidate is required"))]
    pub candidate_ids: Vec<Uuid>,
    pub job_id: Option<Uuid>,
    pub message: Option<String>,
    pub expiry_date: DateTime<Utc>,
    pub interview_date_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchFailure {
    pub candidate_id: Uuid,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDispatchResponse {
    pub success: bool,
    pub sent: usize,
    pub failed: Vec<DispatchFailure>,
}

/// Invite as exposed to staff. The access token hash and check-in token
/// never appear in listings; the plain token is returned once, at issue
/// time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteResponse {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Option<Uuid>,
    pub status: String,
    pub checkin_status: String,
    pub expires_at: DateTime<Utc>,
    pub interview_start_time: Option<DateTime<Utc>>,
    pub sent_at: Option<DateTime<Utc>>,
    pub opened_at: Option<DateTime<Utc>>,
    pub submitted_at: Option<DateTime<Utc>>,
    pub checked_in_at: Option<DateTime<Utc>>,
    pub metadata: Option<JsonValue>,
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Invite> for InviteResponse {
    fn from(invite: Invite) -> Self {
        Self {
            id: invite.id,
            candidate_id: invite.candidate_id,
            job_id: invite.job_id,
            status: invite.status,
            checkin_status: invite.checkin_status,
            expires_at: invite.expires_at,
            interview_start_time: invite.interview_start_time,
            sent_at: invite.sent_at,
            opened_at: invite.opened_at,
            submitted_at: invite.submitted_at,
            checked_in_at: invite.checked_in_at,
            metadata: invite.metadata,
            created_at: invite.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueInviteResponse {
    pub invite: InviteResponse,
    pub access_token: String,
    pub checkin_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<String>,
    pub candidate_id: Option<Uuid>,
    pub job_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InviteListResponse {
    pub items: Vec<InviteResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}
