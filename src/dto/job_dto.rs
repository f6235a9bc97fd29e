use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::job::{Job, JOB_STATUSES};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateJobPayload {
    #[validate(length(min = 1))]
    pub title: String,
    pub department: Option<String>,
    #[validate(range(min = 1))]
    #[serde(default = "default_openings")]
    pub openings: i32,
    #[validate(custom(function = validate_job_status))]
    pub status: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub job_type: Option<String>,
    pub description: Option<String>,
}

fn default_openings() -> i32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateJobPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub department: Option<String>,
    #[validate(range(min = 1))]
    pub openings: Option<i32>,
    #[validate(custom(function = validate_job_status))]
    pub status: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
    pub job_type: Option<String>,
    pub description: Option<String>,
}

fn validate_job_status(status: &str) -> Result<(), ValidationError> {
    if JOB_STATUSES.contains(&status) {
        Ok(())
    } else {
        let mut error = ValidationError::new("status");
        error.message = Some("Status must be one of: active, closed, draft".into());
        Err(error)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobListResponse {
    pub items: Vec<Job>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}
