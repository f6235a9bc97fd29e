use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

/// Token-bound record granting a candidate one-time access to the
/// application form. Only the sha256 hash of the access token is stored.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invite {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub job_id: Option<Uuid>,
    pub token_hash: String,
    pub checkin_token: String,
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
    pub updated_at: Option<DateTime<Utc>>,
}

impl Invite {
    pub fn status(&self) -> InviteStatus {
        InviteStatus::parse(&self.status).unwrap_or(InviteStatus::Revoked)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InviteStatus {
    Pending,
    Sent,
    Opened,
    Submitted,
    Expired,
    Revoked,
}

impl InviteStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            InviteStatus::Pending => "pending",
            InviteStatus::Sent => "sent",
            InviteStatus::Opened => "opened",
            InviteStatus::Submitted => "submitted",
            InviteStatus::Expired => "expired",
            InviteStatus::Revoked => "revoked",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(InviteStatus::Pending),
            "sent" => Some(InviteStatus::Sent),
            "opened" => Some(InviteStatus::Opened),
            "submitted" => Some(InviteStatus::Submitted),
            "expired" => Some(InviteStatus::Expired),
            "revoked" => Some(InviteStatus::Revoked),
            _ => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            InviteStatus::Submitted | InviteStatus::Expired | InviteStatus::Revoked
        )
    }

    /// Allowed lifecycle edges. The happy path is monotonic
    /// (pending -> sent -> opened -> submitted); submission straight from
    /// `sent` is permitted because opening is tracked best-effort. Any
    /// non-terminal invite may expire or be revoked.
    pub fn can_transition_to(self, next: InviteStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match next {
            InviteStatus::Pending => false,
            InviteStatus::Sent => self == InviteStatus::Pending,
            InviteStatus::Opened => self == InviteStatus::Sent,
            InviteStatus::Submitted => {
                self == InviteStatus::Sent || self == InviteStatus::Opened
            }
            InviteStatus::Expired | InviteStatus::Revoked => true,
        }
    }
}

impl std::fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckinStatus {
    Pending,
    Arrived,
    Late,
    Invalid,
}

impl CheckinStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckinStatus::Pending => "pending",
            CheckinStatus::Arrived => "arrived",
            CheckinStatus::Late => "late",
            CheckinStatus::Invalid => "invalid",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path_edges_are_allowed() {
        assert!(InviteStatus::Pending.can_transition_to(InviteStatus::Sent));
        assert!(InviteStatus::Sent.can_transition_to(InviteStatus::Opened));
        assert!(InviteStatus::Opened.can_transition_to(InviteStatus::Submitted));
        assert!(InviteStatus::Sent.can_transition_to(InviteStatus::Submitted));
    }

    #[test]
    fn terminal_states_reject_everything() {
        for terminal in [
            InviteStatus::Submitted,
            InviteStatus::Expired,
            InviteStatus::Revoked,
        ] {
            assert!(terminal.is_terminal());
            assert!(!terminal.can_transition_to(InviteStatus::Sent));
            assert!(!terminal.can_transition_to(InviteStatus::Expired));
        }
    }

    #[test]
    fn submitted_cannot_go_back_to_sent() {
        assert!(!InviteStatus::Submitted.can_transition_to(InviteStatus::Sent));
    }

    #[test]
    fn any_non_terminal_state_may_expire_or_be_revoked() {
        for state in [InviteStatus::Pending, InviteStatus::Sent, InviteStatus::Opened] {
            assert!(state.can_transition_to(InviteStatus::Expired));
            assert!(state.can_transition_to(InviteStatus::Revoked));
        }
    }

    #[test]
    fn skipping_ahead_is_rejected() {
        assert!(!InviteStatus::Pending.can_transition_to(InviteStatus::Opened));
        assert!(!InviteStatus::Pending.can_transition_to(InviteStatus::Submitted));
        assert!(!InviteStatus::Opened.can_transition_to(InviteStatus::Sent));
    }

    #[test]
    fn status_round_trips_through_storage_form() {
        for state in [
            InviteStatus::Pending,
            InviteStatus::Sent,
            InviteStatus::Opened,
            InviteStatus::Submitted,
            InviteStatus::Expired,
            InviteStatus::Revoked,
        ] {
            assert_eq!(InviteStatus::parse(state.as_str()), Some(state));
        }
        assert_eq!(InviteStatus::parse("bogus"), None);
    }
}
