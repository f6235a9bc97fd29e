pub mod application_dto;
pub mod candidate_dto;
pub mod evaluation_dto;
pub mod invite_dto;
pub mod job_dto;
pub mod public_dto;
