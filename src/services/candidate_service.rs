use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::candidate_dto::{CreateCandidatePayload, UpdateCandidatePayload};
use crate::error::{Error, Result};
use crate::models::candidate::Candidate;

#[derive(Clone)]
pub struct CandidateService {
    pool: PgPool,
}

impl CandidateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateCandidatePayload) -> Result<Candidate> {
        let exists: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM candidates WHERE email = $1"#)
                .bind(&payload.email)
                .fetch_one(&self.pool)
                .await?;
        if exists > 0 {
            return Err(Error::Conflict(
                "A candidate with this email address already exists".to_string(),
            ));
        }

        let candidate = sqlx::query_as::<_, Candidate>(
            r#"
            INSERT INTO candidates (name, email, phone, designation, location)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(payload.name)
        .bind(payload.email)
        .bind(payload.phone)
        .bind(payload.designation)
        .bind(payload.location)
        .fetch_one(&self.pool)
        .await?;

        Ok(candidate)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Candidate> {
        sqlx::query_as::<_, Candidate>(r#"SELECT * FROM candidates WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))
    }

    pub async fn list(&self) -> Result<Vec<Candidate>> {
        let candidates = sqlx::query_as::<_, Candidate>(
            r#"SELECT * FROM candidates ORDER BY created_at DESC"#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(candidates)
    }

    /// Administrative edit; candidate records are otherwise immutable after
    /// creation.
    pub async fn update(&self, id: Uuid, payload: UpdateCandidatePayload) -> Result<Candidate> {
        let candidate = sqlx::query_as::<_, Candidate>(
            r#"
            UPDATE candidates
            SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone = COALESCE($4, phone),
                designation = COALESCE($5, designation),
                location = COALESCE($6, location),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.name)
        .bind(payload.email)
        .bind(payload.phone)
        .bind(payload.designation)
        .bind(payload.location)
        .fetch_optional(&self.pool)
        .await?;

        candidate.ok_or_else(|| Error::NotFound("Candidate not found".to_string()))
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(r#"DELETE FROM candidates WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Candidate not found".to_string()));
        }
        Ok(())
    }
}
