pub mod geo;
pub mod pagination;
pub mod token;
