use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An interviewer's structured, scored assessment of a submitted application.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Evaluation {
    pub id: Uuid,
    pub application_id: Uuid,
    pub evaluator_id: Uuid,
    pub qualifications: Option<String>,
    pub experience: Option<String>,
    pub technical_skills: Option<String>,
    pub communication_skills: Option<String>,
    pub confidence: Option<String>,
    pub overall_comments: Option<String>,
    pub rating: i32,
    pub created_at: Option<DateTime<Utc>>,
}

/// Child row of an evaluation, one per scored question. Cascade-deleted
/// with its parent.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EvaluationScore {
    pub id: Uuid,
    pub evaluation_id: Uuid,
    pub question: String,
    pub rating: i32,
}
