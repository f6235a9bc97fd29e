use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub title: String,
    pub department: Option<String>,
    pub openings: i32,
    pub status: String,
    pub deadline: Option<DateTime<Utc>>,
    pub job_type: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

pub const JOB_STATUSES: &[&str] = &["active", "closed", "draft"];
