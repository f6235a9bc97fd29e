pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    application_service::ApplicationService, candidate_service::CandidateService,
    evaluation_service::EvaluationService, invite_service::InviteService, job_service::JobService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub invite_service: InviteService,
    pub application_service: ApplicationService,
    pub evaluation_service: EvaluationService,
    pub job_service: JobService,
    pub candidate_service: CandidateService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let invite_service = InviteService::new(pool.clone());
        let application_service = ApplicationService::new(pool.clone());
        let evaluation_service = EvaluationService::new(pool.clone());
        let job_service = JobService::new(pool.clone());
        let candidate_service = CandidateService::new(pool.clone());

        Self {
            pool,
            invite_service,
            application_service,
            evaluation_service,
            job_service,
            candidate_service,
        }
    }
}
