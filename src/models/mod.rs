pub mod application;
pub mod candidate;
pub mod evaluation;
pub mod invite;
pub mod job;
pub mod user;
