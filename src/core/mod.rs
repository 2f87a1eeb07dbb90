//! Core functionality for the gateway.
//!
//! This module contains fundamental components used throughout the application:
//! - Configuration management
//! - Error handling and the error envelope
//! - Logging and request context
//! - Metrics collection
//! - HTTP middleware
//! - Query parameter helpers

pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod utils;

// Re-export commonly used types
pub use config::{AppConfig, ChatConfig, ProviderConfig, ServerConfig};
pub use error::{AppError, Result};
pub use logging::{generate_request_id, get_request_id, init_tracing, REQUEST_ID};
pub use metrics::{get_metrics, init_metrics, Metrics};
pub use middleware::{request_id_middleware, MetricsMiddleware};
pub use utils::require_param;
