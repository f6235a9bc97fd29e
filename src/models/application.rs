use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateApplication {
    pub id: Uuid,
    pub invite_id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Option<Uuid>,
    pub payload: JsonValue,
    pub is_complete: bool,
    pub status: String,
    pub evaluation_status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub const APPLICATION_STATUSES: &[&str] =
    &["applied", "under_review", "shortlisted", "rejected", "hired"];
