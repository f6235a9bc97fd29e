use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::evaluation::{Evaluation, EvaluationScore};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordEvaluationPayload {
    pub qualifications: Option<String>,
    pub experience: Option<String>,
    pub technical_skills: Option<String>,
    pub communication_skills: Option<String>,
    pub confidence: Option<String>,
    pub overall_comments: Option<String>,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
    #[validate(nested)]
    #[serde(default)]
    pub scores: Vec<QuestionScorePayload>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuestionScorePayload {
    #[validate(length(min = 1, message = "Question is required"))]
    pub question: String,
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResponse {
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
    pub scores: Vec<EvaluationScore>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl EvaluationResponse {
    pub fn from_parts(evaluation: Evaluation, scores: Vec<EvaluationScore>) -> Self {
        Self {
            id: evaluation.id,
            application_id: evaluation.application_id,
            evaluator_id: evaluation.evaluator_id,
            qualifications: evaluation.qualifications,
            experience: evaluation.experience,
            technical_skills: evaluation.technical_skills,
            communication_skills: evaluation.communication_skills,
            confidence: evaluation.confidence,
            overall_comments: evaluation.overall_comments,
            rating: evaluation.rating,
            scores,
            created_at: evaluation.created_at,
        }
    }
}
