use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::evaluation_dto::{EvaluationResponse, RecordEvaluationPayload};
use crate::error::{Error, Result};
use crate::models::application::CandidateApplication;
use crate::models::evaluation::{Evaluation, EvaluationScore};
use crate::models::user::User;

/// Persists an evaluator's structured assessment of a submitted
/// application. One evaluation per (application, evaluator); recording one
/// flips the parent application's evaluation_status to completed.
#[derive(Clone)]
pub struct EvaluationService {
    pool: PgPool,
}

impl EvaluationService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn record(
        &self,
        application_id: Uuid,
        evaluator_id: Uuid,
        payload: RecordEvaluationPayload,
    ) -> Result<EvaluationResponse> {
        let application = sqlx::query_as::<_, CandidateApplication>(
            r#"SELECT * FROM candidate_applications WHERE id = $1"#,
        )
        .bind(application_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::NotFound("Application not found".to_string()))?;

        let evaluator = sqlx::query_as::<_, User>(r#"SELECT * FROM users WHERE id = $1"#)
            .bind(evaluator_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Evaluator not found".to_string()))?;
        if !evaluator.is_active {
            return Err(Error::Forbidden(
                "Evaluator account is deactivated".to_string(),
            ));
        }

        let existing: i64 = sqlx::query_scalar(
            r#"SELECT COUNT(*) FROM evaluations WHERE application_id = $1 AND evaluator_id = $2"#,
        )
        .bind(application.id)
        .bind(evaluator_id)
        .fetch_one(&self.pool)
        .await?;
        if existing > 0 {
            return Err(Error::Conflict(
                "You have already submitted an evaluation for this application".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let evaluation = sqlx::query_as::<_, Evaluation>(
            r#"
            INSERT INTO evaluations (
                application_id, evaluator_id, qualifications, experience,
                technical_skills, communication_skills, confidence,
                overall_comments, rating
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(application.id)
        .bind(evaluator_id)
        .bind(&payload.qualifications)
        .bind(&payload.experience)
        .bind(&payload.technical_skills)
        .bind(&payload.communication_skills)
        .bind(&payload.confidence)
        .bind(&payload.overall_comments)
        .bind(payload.rating)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match &e {
            // Concurrent duplicate that slipped past the pre-check loses on
            // the unique (application_id, evaluator_id) index.
            sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505") => {
                Error::Conflict(
                    "You have already submitted an evaluation for this application".to_string(),
                )
            }
            _ => Error::from(e).on_fk_violation("Unknown application or evaluator"),
        })?;

        let mut scores = Vec::with_capacity(payload.scores.len());
        for score in &payload.scores {
            let row = sqlx::query_as::<_, EvaluationScore>(
                r#"
                INSERT INTO evaluation_scores (evaluation_id, question, rating)
                VALUES ($1, $2, $3)
                RETURNING *
                "#,
            )
            .bind(evaluation.id)
            .bind(&score.question)
            .bind(score.rating)
            .fetch_one(&mut *tx)
            .await?;
            scores.push(row);
        }

        sqlx::query(
            r#"
            UPDATE candidate_applications
            SET evaluation_status = 'completed', updated_at = $1
            WHERE id = $2
            "#,
        )
        .bind(chrono::Utc::now())
        .bind(application.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            evaluation_id = %evaluation.id,
            application_id = %application.id,
            scores = scores.len(),
            "evaluation recorded"
        );
        Ok(EvaluationResponse::from_parts(evaluation, scores))
    }

    pub async fn list_for_application(
        &self,
        application_id: Uuid,
    ) -> Result<Vec<EvaluationResponse>> {
        let evaluations = sqlx::query_as::<_, Evaluation>(
            r#"SELECT * FROM evaluations WHERE application_id = $1 ORDER BY created_at"#,
        )
        .bind(application_id)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(evaluations.len());
        for evaluation in evaluations {
            let scores = sqlx::query_as::<_, EvaluationScore>(
                r#"SELECT * FROM evaluation_scores WHERE evaluation_id = $1 ORDER BY id"#,
            )
            .bind(evaluation.id)
            .fetch_all(&self.pool)
            .await?;
            out.push(EvaluationResponse::from_parts(evaluation, scores));
        }
        Ok(out)
    }
}
