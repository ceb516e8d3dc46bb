//! Core domain concepts shared across the workspace

pub mod error;
pub mod prompt;
pub mod role;
