//! API layer for the gateway.
//!
//! This module contains the HTTP handlers, the response envelope models and
//! the router.

pub mod handlers;
pub mod models;
pub mod routes;

// Re-export commonly used types
pub use handlers::{
    deepseek, domain, gpt_oss, health, image, index, llama, metrics_handler, search, AppState,
};
pub use models::{
    ChatResponse, DomainResponse, Envelope, ImageResponse, IndexResponse, SearchResults,
};
pub use routes::build_router;
