pub mod application_service;
pub mod candidate_service;
pub mod checkin;
pub mod evaluation_service;
pub mod invite_service;
pub mod job_service;
