//! Log storage adapters

mod json_file;

pub use json_file::{DEFAULT_LOG_FILE, JsonFileStorage};
