use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::checkin::CheckInCode;

#[derive(Debug, Clone, Deserialize)]
pub struct CheckInQuery {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// External check-in contract: always 200 with a status code string the
/// kiosk/browser renders directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInResponse {
    #[serde(rename = "statusCode")]
    pub status_code: CheckInCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checked_in_at: Option<DateTime<Utc>>,
}

impl CheckInResponse {
    pub fn from_code(code: CheckInCode) -> Self {
        Self {
            status_code: code,
            message: code.default_message().to_string(),
            checked_in_at: None,
        }
    }

    pub fn success(checked_in_at: DateTime<Utc>) -> Self {
        Self {
            status_code: CheckInCode::Success,
            message: CheckInCode::Success.default_message().to_string(),
            checked_in_at: Some(checked_in_at),
        }
    }
}

/// What the public form page needs to render: invite state plus candidate
/// and job context. Never exposes tokens or internal ids beyond the ones
/// the candidate already holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationContextResponse {
    pub invite: PublicInviteSummary,
    pub candidate: PublicCandidateSummary,
    pub job: Option<PublicJobSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicInviteSummary {
    pub status: String,
    pub expires_at: DateTime<Utc>,
    pub interview_start_time: Option<DateTime<Utc>>,
    pub opened_at: Option<DateTime<Utc>>,
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicCandidateSummary {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicJobSummary {
    pub title: String,
    pub department: Option<String>,
    pub job_type: Option<String>,
    pub deadline: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkin_response_uses_the_wire_field_name() {
        let resp = CheckInResponse::from_code(CheckInCode::TooEarly);
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["statusCode"], "too_early");
        assert!(value.get("checked_in_at").is_none());
    }
}
