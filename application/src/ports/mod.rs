//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation
//! adapters must implement.

pub mod completion_gateway;
pub mod log_storage;
pub mod progress;
pub mod repair_confirmation;
