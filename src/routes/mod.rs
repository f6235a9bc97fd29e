pub mod application_routes;
pub mod candidate_routes;
pub mod evaluation_routes;
pub mod health;
pub mod invite_routes;
pub mod job_routes;
pub mod public;
