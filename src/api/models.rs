//! Response models for the gateway API.
//!
//! Every successful response is an [`Envelope`]: `{"status": "success"}` merged
//! with a capability-specific payload. Failures are rendered by
//! [`AppError`](crate::core::AppError).

use crate::services::{ChatReply, DomainReport, GeneratedImage, SearchHit};
use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const STATUS_SUCCESS: &str = "success";

/// Success envelope around a capability payload.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub status: &'static str,
    #[serde(flatten)]
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: STATUS_SUCCESS,
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Chat completion payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    /// Display name of the model
    pub model: String,
    /// Echo of the user message
    pub message: String,
    /// First choice content
    pub reply: String,
    /// Provider reasoning trace, reasoning-enabled models only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<Value>,
}

impl ChatResponse {
    pub fn new(model: &str, message: &str, reply: ChatReply) -> Self {
        Self {
            model: model.to_string(),
            message: message.to_string(),
            reply: reply.reply,
            reasoning: reply.reasoning,
        }
    }
}

/// Web search payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResults {
    pub query: String,
    pub results: Vec<SearchHit>,
    pub count: usize,
}

impl SearchResults {
    pub fn new(query: &str, results: Vec<SearchHit>) -> Self {
        Self {
            query: query.to_string(),
            count: results.len(),
            results,
        }
    }
}

/// Image generation payload. Both URLs point at the same rendered image.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageResponse {
    pub prompt: String,
    pub image_url: String,
    pub direct_download: String,
}

impl ImageResponse {
    pub fn new(prompt: &str, image: GeneratedImage) -> Self {
        Self {
            prompt: prompt.to_string(),
            image_url: image.url.clone(),
            direct_download: image.url,
        }
    }
}

/// Domain analysis payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainResponse {
    pub domain: String,
    pub ip: String,
    pub subdomains: Vec<String>,
    pub subdomain_count: usize,
}

impl From<DomainReport> for DomainResponse {
    fn from(report: DomainReport) -> Self {
        Self {
            domain: report.domain,
            ip: report.ip.to_string(),
            subdomain_count: report.subdomains.len(),
            subdomains: report.subdomains,
        }
    }
}

/// Service index served at `/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexResponse {
    pub message: String,
    pub status: String,
    pub endpoints: BTreeMap<String, String>,
    pub docs: String,
}

impl Default for IndexResponse {
    fn default() -> Self {
        let endpoints = [
            ("/api/llama", "Llama 3.3 Model"),
            ("/api/deepseek", "DeepSeek R1 Model"),
            ("/api/gpt-oss", "GPT OSS 120B"),
            ("/api/search", "Google Search"),
            ("/api/image", "Generate Images"),
            ("/api/domain", "Domain Analysis"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            message: "Prime API gateway".to_string(),
            status: "active".to_string(),
            endpoints,
            docs: "Use /api/{endpoint}?param=value".to_string(),
        }
    }
}
