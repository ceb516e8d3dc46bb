//! Completion service adapter

mod http_gateway;
mod settings;

pub use http_gateway::HttpCompletionGateway;
pub use settings::CompletionSettings;
