//! Completion service value objects

pub mod payload;
pub mod request;
