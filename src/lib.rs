//! Prime Gateway - a small HTTP gateway over third-party web APIs
//!
//! The gateway exposes one GET endpoint per capability and reshapes every
//! upstream answer into a uniform JSON envelope:
//!
//! - **Chat completions** (`/api/llama`, `/api/deepseek`, `/api/gpt-oss`)
//! - **Web search** (`/api/search`)
//! - **Image generation** (`/api/image`)
//! - **Domain analysis** (`/api/domain`): IPv4 resolution plus subdomains from
//!   certificate-transparency logs
//!
//! Successful responses look like `{"status": "success", ...}`; failures look
//! like `{"error": "..."}` with HTTP 400 for a missing parameter and 500 for
//! anything that went wrong upstream.
//!
//! # Architecture
//!
//! - [`core`]: configuration, errors, logging, metrics, middleware
//! - [`api`]: HTTP handlers, envelope models and the router
//! - [`services`]: one module per upstream capability
//!
//! # Configuration
//!
//! Credentials:
//! - `OPENROUTER_API_KEY`: chat-completions provider key
//! - `SERPER_API_KEY`: search provider key
//!
//! Optional environment variables:
//! - `HOST`: Server bind address (default: 0.0.0.0)
//! - `PORT`: Server port (default: 18000)
//! - `VERIFY_SSL`: Verify SSL certificates for upstream (default: true)
//! - `OPENROUTER_URL`, `SERPER_URL`, `IMAGE_URL`, `CRT_SH_URL`: upstream endpoints

pub mod api;
pub mod core;
pub mod services;

// Re-export commonly used types for convenience
pub use crate::api::{build_router, AppState};
pub use crate::core::{AppConfig, AppError, Result};
