//! HTTP surface for the podcast generator: request parsing, the router,
//! configuration, retries around the model, and service metrics.

pub mod config;
pub mod error;
pub mod input;
pub mod metrics;
pub mod retry;
pub mod routes;
pub mod state;

pub use config::{AppConfig, ConfigError, LlmProvider, LogFormat};
pub use error::ApiError;
pub use routes::build_router;
pub use state::{AppState, SharedState};
