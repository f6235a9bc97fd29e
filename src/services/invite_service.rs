use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::get_config;
use crate::dto::invite_dto::{
    BulkDispatchPayload, BulkDispatchResponse, DispatchFailure, InviteListQuery,
};
use crate::dto::public_dto::CheckInResponse;
use crate::error::{Error, Result};
use crate::models::invite::{CheckinStatus, Invite, InviteStatus};
use crate::services::checkin::{ArrivalVerdict, CheckInCode, CheckinWindow, Geofence};
use crate::utils::pagination::page_bounds;
use crate::utils::token::{generate_access_token, hash_token};

/// Mediates every state change of an invite and gates interview check-in
/// against the configured time window and venue geofence. All transitions
/// are conditional UPDATEs so concurrent requests cannot both win.
#[derive(Clone)]
pub struct InviteService {
    pool: PgPool,
}

#[derive(Debug, Clone)]
pub struct IssuedInvite {
    pub invite: Invite,
    pub access_token: String,
    pub checkin_token: String,
}

impl InviteService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a pending invite with a fresh access token. Only the sha256
    /// hash of the token is persisted; the plain token is returned once for
    /// dispatch.
    pub async fn issue(
        &self,
        candidate_id: Uuid,
        job_id: Option<Uuid>,
        expires_at: DateTime<Utc>,
        interview_start_time: Option<DateTime<Utc>>,
        metadata: Option<JsonValue>,
    ) -> Result<IssuedInvite> {
        if expires_at <= Utc::now() {
            return Err(Error::BadRequest(
                "Invite expiry must be in the future".to_string(),
            ));
        }

        let token_length = get_config().invite_token_length;
        let access_token = generate_access_token(token_length);
        let checkin_token = generate_access_token(token_length);

        let invite = sqlx::query_as::<_, Invite>(
            r#"
            INSERT INTO invites (
                candidate_id, job_id, token_hash, checkin_token,
                status, checkin_status, expires_at, interview_start_time, metadata
            ) VALUES ($1, $2, $3, $4, 'pending', 'pending', $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(candidate_id)
        .bind(job_id)
        .bind(hash_token(&access_token))
        .bind(&checkin_token)
        .bind(expires_at)
        .bind(interview_start_time)
        .bind(metadata)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| Error::from(e).on_fk_violation("Unknown candidate or job"))?;

        Ok(IssuedInvite {
            invite,
            access_token,
            checkin_token,
        })
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Invite> {
        sqlx::query_as::<_, Invite>(r#"SELECT * FROM invites WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Invite not found".to_string()))
    }

    /// Resolves the access token (the sole credential) to its invite.
    pub async fn get_by_token(&self, token: &str) -> Result<Invite> {
        sqlx::query_as::<_, Invite>(r#"SELECT * FROM invites WHERE token_hash = $1"#)
            .bind(hash_token(token))
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Invite not found".to_string()))
    }

    /// pending -> sent. Records sent_at. Delivery itself happens outside
    /// this service.
    pub async fn mark_sent(&self, id: Uuid) -> Result<Invite> {
        let now = Utc::now();
        let updated = sqlx::query_as::<_, Invite>(
            r#"
            UPDATE invites
            SET status = 'sent', sent_at = $1, updated_at = $1
            WHERE id = $2 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(invite) => Ok(invite),
            None => {
                let invite = self.get_by_id(id).await?;
                Err(Error::InvalidTransition(format!(
                    "Cannot mark a '{}' invite as sent",
                    invite.status
                )))
            }
        }
    }

    /// sent -> opened, recording opened_at. Re-opening an already-opened
    /// invite is a no-op. Expiry is evaluated lazily here: an access past
    /// expires_at flips the invite to expired and reports it.
    pub async fn mark_opened(&self, token: &str) -> Result<Invite> {
        let invite = self.get_by_token(token).await?;
        self.ensure_not_expired(&invite).await?;

        let now = Utc::now();
        match invite.status() {
            InviteStatus::Opened | InviteStatus::Submitted => Ok(invite),
            InviteStatus::Revoked => {
                Err(Error::Revoked("This invitation has been revoked".to_string()))
            }
            InviteStatus::Sent => {
                let updated = sqlx::query_as::<_, Invite>(
                    r#"
                    UPDATE invites
                    SET status = 'opened', opened_at = $1, updated_at = $1
                    WHERE id = $2 AND status = 'sent'
                    RETURNING *
                    "#,
                )
                .bind(now)
                .bind(invite.id)
                .fetch_optional(&self.pool)
                .await?;

                match updated {
                    Some(opened) => Ok(opened),
                    // Lost a race with another open; both callers see opened.
                    None => self.get_by_id(invite.id).await,
                }
            }
            other => Err(Error::InvalidTransition(format!(
                "Cannot open a '{}' invite",
                other
            ))),
        }
    }

    /// sent|opened -> submitted. The application intake couples this with
    /// its insert inside one transaction; this standalone form exists for
    /// administrative correction.
    pub async fn mark_submitted(&self, id: Uuid) -> Result<Invite> {
        let now = Utc::now();
        let updated = sqlx::query_as::<_, Invite>(
            r#"
            UPDATE invites
            SET status = 'submitted', submitted_at = $1, updated_at = $1
            WHERE id = $2 AND status IN ('sent', 'opened')
            RETURNING *
            "#,
        )
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(invite) => Ok(invite),
            None => {
                let invite = self.get_by_id(id).await?;
                Err(Error::InvalidTransition(format!(
                    "Cannot mark a '{}' invite as submitted",
                    invite.status
                )))
            }
        }
    }

    /// Administrative revocation; allowed from any non-terminal state.
    pub async fn revoke(&self, id: Uuid) -> Result<Invite> {
        let now = Utc::now();
        let updated = sqlx::query_as::<_, Invite>(
            r#"
            UPDATE invites
            SET status = 'revoked', updated_at = $1
            WHERE id = $2 AND status NOT IN ('submitted', 'expired', 'revoked')
            RETURNING *
            "#,
        )
        .bind(now)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(invite) => Ok(invite),
            None => {
                let invite = self.get_by_id(id).await?;
                Err(Error::InvalidTransition(format!(
                    "Cannot revoke a '{}' invite",
                    invite.status
                )))
            }
        }
    }

    /// Lazy expiry: there is no background sweep; any access that observes
    /// now > expires_at flips a non-terminal invite to expired.
    pub async fn ensure_not_expired(&self, invite: &Invite) -> Result<()> {
        if !invite.is_expired_at(Utc::now()) {
            return Ok(());
        }
        if !invite.status().is_terminal() {
            sqlx::query(
                r#"
                UPDATE invites
                SET status = 'expired', updated_at = $1
                WHERE id = $2 AND status NOT IN ('submitted', 'expired', 'revoked')
                "#,
            )
            .bind(Utc::now())
            .bind(invite.id)
            .execute(&self.pool)
            .await?;
        }
        if invite.status() == InviteStatus::Revoked {
            return Err(Error::Revoked("This invitation has been revoked".to_string()));
        }
        Err(Error::Expired("This invitation has expired".to_string()))
    }

    /// Geolocation- and time-gated arrival confirmation. Business outcomes
    /// are values, not errors: the endpoint always answers with a status
    /// code string. Re-entry after a successful check-in is a success that
    /// preserves the original checked_in_at.
    pub async fn check_in(
        &self,
        checkin_token: &str,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<CheckInResponse> {
        let invite = sqlx::query_as::<_, Invite>(
            r#"SELECT * FROM invites WHERE checkin_token = $1"#,
        )
        .bind(checkin_token)
        .fetch_optional(&self.pool)
        .await?;

        let Some(invite) = invite else {
            return Ok(CheckInResponse::from_code(CheckInCode::InvalidLink));
        };
        if invite.status() == InviteStatus::Revoked {
            return Ok(CheckInResponse::from_code(CheckInCode::InvalidLink));
        }
        if let Some(at) = invite.checked_in_at {
            return Ok(CheckInResponse::success(at));
        }
        let Some(start) = invite.interview_start_time else {
            // No interview scheduled for this invite.
            return Ok(CheckInResponse::from_code(CheckInCode::InvalidLink));
        };
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            return Ok(CheckInResponse::from_code(CheckInCode::LocationRequired));
        };

        let config = get_config();
        let window = CheckinWindow {
            open_before_minutes: config.checkin_open_before_minutes,
            grace_minutes: config.checkin_grace_minutes,
            late_window_minutes: config.checkin_late_window_minutes,
        };
        let fence = Geofence {
            latitude: config.venue_latitude,
            longitude: config.venue_longitude,
            radius_meters: config.checkin_radius_meters,
        };

        let now = Utc::now();
        let checkin_status = match window.classify(start, now) {
            ArrivalVerdict::TooEarly => {
                return Ok(CheckInResponse::from_code(CheckInCode::TooEarly));
            }
            ArrivalVerdict::TooLate => {
                self.mark_checkin_invalid(invite.id).await?;
                return Ok(CheckInResponse::from_code(CheckInCode::TooLate));
            }
            ArrivalVerdict::OnTime => CheckinStatus::Arrived,
            ArrivalVerdict::Late => CheckinStatus::Late,
        };

        if !fence.contains(latitude, longitude) {
            return Ok(CheckInResponse::from_code(CheckInCode::WrongLocation));
        }

        let updated = sqlx::query_as::<_, Invite>(
            r#"
            UPDATE invites
            SET checked_in_at = $1, checkin_status = $2, updated_at = $1
            WHERE id = $3 AND checked_in_at IS NULL
            RETURNING *
            "#,
        )
        .bind(now)
        .bind(checkin_status.as_str())
        .bind(invite.id)
        .fetch_optional(&self.pool)
        .await?;

        match updated {
            Some(invite) => {
                tracing::info!(invite_id = %invite.id, status = checkin_status.as_str(), "candidate checked in");
                Ok(CheckInResponse::success(invite.checked_in_at.unwrap_or(now)))
            }
            None => {
                // Concurrent check-in won; report its timestamp.
                let current = self.get_by_id(invite.id).await?;
                Ok(CheckInResponse::success(current.checked_in_at.unwrap_or(now)))
            }
        }
    }

    async fn mark_checkin_invalid(&self, id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE invites
            SET checkin_status = 'invalid', updated_at = $1
            WHERE id = $2 AND checkin_status = 'pending'
            "#,
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// One invite per candidate, each marked sent; delivery transport is an
    /// external collaborator. Per-candidate failures are collected, not
    /// fatal.
    pub async fn bulk_dispatch(&self, payload: BulkDispatchPayload) -> Result<BulkDispatchResponse> {
        let metadata = payload
            .message
            .as_ref()
            .map(|m| serde_json::json!({ "message": m }));

        let mut sent = 0usize;
        let mut failed: Vec<DispatchFailure> = Vec::new();

        for candidate_id in payload.candidate_ids {
            let issued = self
                .issue(
                    candidate_id,
                    payload.job_id,
                    payload.expiry_date,
                    payload.interview_date_time,
                    metadata.clone(),
                )
                .await;

            match issued {
                Ok(issued) => match self.mark_sent(issued.invite.id).await {
                    Ok(_) => sent += 1,
                    Err(e) => failed.push(DispatchFailure {
                        candidate_id,
                        reason: e.to_string(),
                    }),
                },
                Err(e) => failed.push(DispatchFailure {
                    candidate_id,
                    reason: e.to_string(),
                }),
            }
        }

        if !failed.is_empty() {
            tracing::warn!(failed = failed.len(), sent, "bulk invite dispatch had failures");
        }

        Ok(BulkDispatchResponse {
            success: failed.is_empty(),
            sent,
            failed,
        })
    }

    pub async fn list(&self, query: InviteListQuery) -> Result<(Vec<Invite>, i64)> {
        let (_, per_page, offset) = page_bounds(query.page, query.per_page);

        let rows = sqlx::query_as::<_, Invite>(
            r#"
            SELECT * FROM invites
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR candidate_id = $2)
              AND ($3::uuid IS NULL OR job_id = $3)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(query.status.clone())
        .bind(query.candidate_id)
        .bind(query.job_id)
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM invites
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR candidate_id = $2)
              AND ($3::uuid IS NULL OR job_id = $3)
            "#,
        )
        .bind(query.status)
        .bind(query.candidate_id)
        .bind(query.job_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((rows, total))
    }

    /// Only never-dispatched invites can be removed.
    pub async fn delete_pending(&self, id: Uuid) -> Result<()> {
        let invite = self.get_by_id(id).await?;
        if invite.status() != InviteStatus::Pending {
            return Err(Error::BadRequest(format!(
                "Cannot delete an invite with status '{}'. Only 'pending' invites can be removed.",
                invite.status
            )));
        }

        sqlx::query(r#"DELETE FROM invites WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
