use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::job_dto::{CreateJobPayload, JobListQuery, UpdateJobPayload};
use crate::error::{Error, Result};
use crate::models::job::Job;
use crate::utils::pagination::page_bounds;

#[derive(Clone)]
pub struct JobService {
    pool: PgPool,
}

pub struct JobList {
    pub items: Vec<Job>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl JobService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        let status = payload.status.unwrap_or_else(|| "draft".to_string());
        let job = sqlx::query_as::<_, Job>(
            r#"
            INSERT INTO jobs (title, department, openings, status, deadline, job_type, description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(payload.title)
        .bind(payload.department)
        .bind(payload.openings)
        .bind(status)
        .bind(payload.deadline)
        .bind(payload.job_type)
        .bind(payload.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(job)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateJobPayload) -> Result<Job> {
        let job = sqlx::query_as::<_, Job>(
            r#"
            UPDATE jobs
            SET
                title = COALESCE($2, title),
                department = COALESCE($3, department),
                openings = COALESCE($4, openings),
                status = COALESCE($5, status),
                deadline = COALESCE($6, deadline),
                job_type = COALESCE($7, job_type),
                description = COALESCE($8, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.title)
        .bind(payload.department)
        .bind(payload.openings)
        .bind(payload.status)
        .bind(payload.deadline)
        .bind(payload.job_type)
        .bind(payload.description)
        .fetch_optional(&self.pool)
        .await?;

        job.ok_or_else(|| Error::NotFound("Job not found".to_string()))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Job> {
        sqlx::query_as::<_, Job>(r#"SELECT * FROM jobs WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))
    }

    pub async fn list(&self, query: JobListQuery) -> Result<JobList> {
        let (page, per_page, offset) = page_bounds(query.page, query.per_page);
        let search = query.search.map(|s| format!("%{}%", s));

        let items = sqlx::query_as::<_, Job>(
            r#"
            SELECT * FROM jobs
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR title ILIKE $2 OR department ILIKE $2)
            ORDER BY created_at DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(query.status.clone())
        .bind(search.clone())
        .bind(per_page)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM jobs
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR title ILIKE $2 OR department ILIKE $2)
            "#,
        )
        .bind(query.status)
        .bind(search)
        .fetch_one(&self.pool)
        .await?;

        let total_pages = (total + per_page - 1) / per_page;
        Ok(JobList {
            items,
            total,
            page,
            per_page,
            total_pages,
        })
    }

    /// Public board: active postings whose deadline has not passed.
    pub async fn list_public(&self) -> Result<Vec<Job>> {
        let jobs = sqlx::query_as::<_, Job>(
            r#"
            SELECT * FROM jobs
            WHERE status = 'active' AND (deadline IS NULL OR deadline > $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(Utc::now())
        .fetch_all(&self.pool)
        .await?;
        Ok(jobs)
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query(r#"DELETE FROM jobs WHERE id = $1"#)
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Job not found".to_string()));
        }
        Ok(())
    }
}
