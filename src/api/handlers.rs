//! HTTP request handlers for the gateway API.
//!
//! Handlers only extract and validate the query parameter, delegate to the
//! matching service and wrap the result in an [`Envelope`].

use crate::api::models::*;
use crate::core::{require_param, AppConfig, AppError, Result};
use crate::services::{self, ChatModel, HostResolver, SystemResolver};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use prometheus::{Encoder, TextEncoder};
use std::collections::HashMap;
use std::sync::Arc;

type Params = Query<HashMap<String, String>>;

/// Shared application state. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub http_client: reqwest::Client,
    pub resolver: Arc<dyn HostResolver>,
}

impl AppState {
    pub fn new(config: AppConfig, http_client: reqwest::Client) -> Self {
        Self::with_resolver(config, http_client, Arc::new(SystemResolver))
    }

    pub fn with_resolver(
        config: AppConfig,
        http_client: reqwest::Client,
        resolver: Arc<dyn HostResolver>,
    ) -> Self {
        Self {
            config,
            http_client,
            resolver,
        }
    }
}

/// Service index.
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse::default())
}

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn chat(
    state: &AppState,
    params: &HashMap<String, String>,
    model: ChatModel,
) -> Result<Envelope<ChatResponse>> {
    let message = require_param(params, "message")?;
    let reply =
        services::chat::complete(&state.http_client, &state.config.chat, model, message).await?;
    Ok(Envelope::success(ChatResponse::new(
        model.display_name(),
        message,
        reply,
    )))
}

pub async fn llama(
    State(state): State<Arc<AppState>>,
    Query(params): Params,
) -> Result<Envelope<ChatResponse>> {
    chat(&state, &params, ChatModel::Llama).await
}

pub async fn deepseek(
    State(state): State<Arc<AppState>>,
    Query(params): Params,
) -> Result<Envelope<ChatResponse>> {
    chat(&state, &params, ChatModel::DeepSeek).await
}

pub async fn gpt_oss(
    State(state): State<Arc<AppState>>,
    Query(params): Params,
) -> Result<Envelope<ChatResponse>> {
    chat(&state, &params, ChatModel::GptOss).await
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Params,
) -> Result<Envelope<SearchResults>> {
    let query = require_param(&params, "query")?;
    let results =
        services::search::search(&state.http_client, &state.config.search, query).await?;
    Ok(Envelope::success(SearchResults::new(query, results)))
}

pub async fn image(
    State(state): State<Arc<AppState>>,
    Query(params): Params,
) -> Result<Envelope<ImageResponse>> {
    let prompt = require_param(&params, "prompt")?;
    let image = services::image::generate(&state.http_client, &state.config.image, prompt).await?;
    Ok(Envelope::success(ImageResponse::new(prompt, image)))
}

pub async fn domain(
    State(state): State<Arc<AppState>>,
    Query(params): Params,
) -> Result<Envelope<DomainResponse>> {
    let domain = require_param(&params, "domain")?;
    let report = services::domain::analyze(
        &state.http_client,
        &state.config.cert_log,
        state.resolver.as_ref(),
        domain,
    )
    .await?;
    Ok(Envelope::success(DomainResponse::from(report)))
}

/// Prometheus metrics endpoint.
pub async fn metrics_handler() -> Result<Response> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();

    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok((
        StatusCode::OK,
        [(axum::http::header::CONTENT_TYPE, encoder.format_type().to_string())],
        buffer,
    )
        .into_response())
}
