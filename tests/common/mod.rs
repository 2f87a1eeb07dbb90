//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use futures::future::BoxFuture;
use prime_gateway::{
    build_router,
    core::{init_metrics, AppConfig, ChatConfig, ProviderConfig, ServerConfig},
    services::HostResolver,
    AppState,
};
use std::io;
use std::net::Ipv4Addr;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const CHAT_PATH: &str = "/api/v1/chat/completions";
pub const SEARCH_PATH: &str = "/search";
pub const IMAGE_PATH: &str = "/image";
pub const CERT_LOG_PATH: &str = "/";

pub const CHAT_KEY: &str = "test_chat_key";
pub const SEARCH_KEY: &str = "test_search_key";

fn provider(
    name: &str,
    url: String,
    key: Option<&str>,
    env: Option<&str>,
    timeout: u64,
) -> ProviderConfig {
    ProviderConfig {
        name: name.to_string(),
        endpoint_url: url,
        model_id: None,
        api_key: key.map(str::to_string),
        api_key_env: env.map(str::to_string),
        timeout_secs: timeout,
    }
}

/// Config with every upstream rooted at `base`.
pub fn test_config(base: &str) -> AppConfig {
    let mut image = provider("text2img", format!("{}{}", base, IMAGE_PATH), None, None, 5);
    image.model_id = Some("flux".to_string());

    AppConfig {
        server: ServerConfig::default(),
        verify_ssl: false,
        chat: ChatConfig {
            provider: provider(
                "openrouter",
                format!("{}{}", base, CHAT_PATH),
                Some(CHAT_KEY),
                Some("OPENROUTER_API_KEY"),
                5,
            ),
            llama_model: "meta-llama/llama-3.3-70b-instruct:free".to_string(),
            deepseek_model: "deepseek/deepseek-r1-0528:free".to_string(),
            gpt_oss_model: "openai/gpt-oss-120b:free".to_string(),
        },
        search: provider(
            "serper",
            format!("{}{}", base, SEARCH_PATH),
            Some(SEARCH_KEY),
            Some("SERPER_API_KEY"),
            5,
        ),
        image,
        cert_log: provider("crt.sh", format!("{}{}", base, CERT_LOG_PATH), None, None, 5),
    }
}

/// Resolver returning a fixed answer and remembering what it was asked.
pub struct StubResolver {
    answer: Option<Ipv4Addr>,
    pub seen: Mutex<Vec<String>>,
}

impl StubResolver {
    pub fn resolving_to(ip: Ipv4Addr) -> Self {
        Self {
            answer: Some(ip),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            seen: Mutex::new(Vec::new()),
        }
    }
}

impl HostResolver for StubResolver {
    fn resolve_ipv4<'a>(&'a self, host: &'a str) -> BoxFuture<'a, io::Result<Ipv4Addr>> {
        self.seen.lock().unwrap().push(host.to_string());
        let answer = self.answer.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("failed to lookup address information for {}", host),
            )
        });
        Box::pin(async move { answer })
    }
}

pub fn create_test_app(config: AppConfig, resolver: Arc<dyn HostResolver>) -> Router {
    init_metrics();

    let http_client = reqwest::Client::builder()
        .danger_accept_invalid_certs(!config.verify_ssl)
        .build()
        .expect("Failed to build HTTP client");

    build_router(Arc::new(AppState::with_resolver(
        config,
        http_client,
        resolver,
    )))
}

/// Issue a GET and return status plus parsed JSON body.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}
