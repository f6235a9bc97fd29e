use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::application_dto::{ApplicationForm, ApplicationListQuery};
use crate::error::{Error, Result};
use crate::models::application::{CandidateApplication, APPLICATION_STATUSES};
use crate::models::invite::{Invite, InviteStatus};
use crate::services::invite_service::InviteService;
use crate::utils::pagination::page_bounds;

/// Persists a candidate's multi-step form submission against a specific
/// invite. Exactly one application per invite: the invite transition and
/// the insert share one transaction, and the transition is a conditional
/// UPDATE so a concurrent duplicate submission loses.
#[derive(Clone)]
pub struct ApplicationService {
    pool: PgPool,
}

impl ApplicationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn submit(&self, token: &str, form: ApplicationForm) -> Result<CandidateApplication> {
        form.validate_submission()?;

        let invite_service = InviteService::new(self.pool.clone());
        let invite = invite_service.get_by_token(token).await?;
        invite_service.ensure_not_expired(&invite).await?;

        match invite.status() {
            InviteStatus::Submitted => {
                return Err(Error::AlreadySubmitted(
                    "An application has already been submitted for this invitation".to_string(),
                ));
            }
            InviteStatus::Revoked => {
                return Err(Error::Revoked(
                    "This invitation has been revoked".to_string(),
                ));
            }
            InviteStatus::Pending => {
                return Err(Error::InvalidTransition(
                    "This invitation has not been dispatched yet".to_string(),
                ));
            }
            InviteStatus::Expired => {
                return Err(Error::Expired("This invitation has expired".to_string()));
            }
            InviteStatus::Sent | InviteStatus::Opened => {}
        }

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let transitioned = sqlx::query_as::<_, Invite>(
            r#"
            UPDATE invites
            SET status = 'submitted', submitted_at = $1, updated_at = $1
            WHERE id = $2 AND status IN ('sent', 'opened')
            RETURNING *
            "#,
        )
        .bind(now)
        .bind(invite.id)
        .fetch_optional(&mut *tx)
        .await?;

        if transitioned.is_none() {
            tx.rollback().await?;
            return Err(Error::AlreadySubmitted(
                "An application has already been submitted for this invitation".to_string(),
            ));
        }

        let payload = serde_json::to_value(&form)?;
        let application = sqlx::query_as::<_, CandidateApplication>(
            r#"
            INSERT INTO candidate_applications (
                invite_id, candidate_id, job_id, payload,
                is_complete, status, evaluation_status
            ) VALUES ($1, $2, $3, $4, TRUE, 'applied', 'pending')
            RETURNING *
            "#,
        )
        .bind(invite.id)
        .bind(invite.candidate_id)
        .bind(invite.job_id)
        .bind(payload)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                Error::AlreadySubmitted(
                    "An application has already been submitted for this invitation".to_string(),
                )
            }
            _ => Error::from(e),
        })?;

        tx.commit().await?;

        tracing::info!(
            application_id = %application.id,
            invite_id = %invite.id,
            "application submitted"
        );
        Ok(application)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<CandidateApplication> {
        sqlx::query_as::<_, CandidateApplication>(
            r#"SELECT * FROM candidate_applications WHERE id = $1"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".to_string()))
    }

    pub async fn list(
        &self,
        query: ApplicationListQuery,
    ) -> Result<(Vec<CandidateApplication>, i64)> {
        let (_, per_page, offset) = page_bounds(query.page, query.per_page);

        let rows = sqlx::query_as::<_, CandidateApplication>(
            r#"
            SELECT * FROM candidate_applications
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR job_id = $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(query.status.clone())
        .bind(query.job_id)
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM candidate_applications
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::uuid IS NULL OR job_id = $2)
            "#,
        )
        .bind(query.status)
        .bind(query.job_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((rows, total))
    }

    /// HR pipeline status. Free-form between the known states; not a
    /// lifecycle machine like the invite status.
    pub async fn update_status(&self, id: Uuid, status: &str) -> Result<CandidateApplication> {
        if !APPLICATION_STATUSES.contains(&status) {
            return Err(Error::BadRequest(format!(
                "Unknown application status '{}'",
                status
            )));
        }

        sqlx::query_as::<_, CandidateApplication>(
            r#"
            UPDATE candidate_applications
            SET status = $1, updated_at = $2
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(status)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".to_string()))
    }
}
