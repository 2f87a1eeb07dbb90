//! Configuration management for the gateway.
//!
//! Configuration is read once from environment variables at startup and is
//! immutable afterwards. Endpoint URLs, model ids and timeouts carry literal
//! defaults; API keys never do.

use anyhow::{Context, Result};
use serde::Serialize;

/// Main application configuration.
#[derive(Debug, Clone, Serialize)]
pub struct AppConfig {
    /// Server configuration (host, port)
    pub server: ServerConfig,

    /// Whether to verify SSL certificates for upstream requests
    pub verify_ssl: bool,

    /// Chat-completions provider shared by the llama, deepseek and gpt-oss routes
    pub chat: ChatConfig,

    /// Web search provider
    pub search: ProviderConfig,

    /// Image generation endpoint
    pub image: ProviderConfig,

    /// Certificate-transparency search service
    pub cert_log: ProviderConfig,
}

/// Configuration for a single upstream provider.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderConfig {
    /// Provider name (for logging and metrics)
    pub name: String,

    /// Full URL of the upstream endpoint
    pub endpoint_url: String,

    /// Model identifier sent upstream, when the provider takes one
    pub model_id: Option<String>,

    /// Credential for the provider, if it needs one
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Environment variable the credential is read from
    pub api_key_env: Option<String>,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

/// Chat provider plus the model ids for each chat route.
#[derive(Debug, Clone, Serialize)]
pub struct ChatConfig {
    pub provider: ProviderConfig,
    pub llama_model: String,
    pub deepseek_model: String,
    pub gpt_oss_model: String,
}

/// Server-specific configuration.
#[derive(Debug, Clone, Serialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

pub const DEFAULT_CHAT_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_SEARCH_URL: &str = "https://google.serper.dev/search";
pub const DEFAULT_IMAGE_URL: &str = "https://text2img.hideme.eu.org/image";
pub const DEFAULT_CERT_LOG_URL: &str = "https://crt.sh/";

pub const DEFAULT_LLAMA_MODEL: &str = "meta-llama/llama-3.3-70b-instruct:free";
pub const DEFAULT_DEEPSEEK_MODEL: &str = "deepseek/deepseek-r1-0528:free";
pub const DEFAULT_GPT_OSS_MODEL: &str = "openai/gpt-oss-120b:free";
pub const DEFAULT_IMAGE_MODEL: &str = "flux";

const CHAT_TIMEOUT_SECS: u64 = 30;
const SEARCH_TIMEOUT_SECS: u64 = 30;
const IMAGE_TIMEOUT_SECS: u64 = 60;
const CERT_LOG_TIMEOUT_SECS: u64 = 10;

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    18000
}

fn default_verify_ssl() -> bool {
    true
}

impl ProviderConfig {
    /// Return the API key or a `MissingCredential` error naming its variable.
    pub fn require_api_key(&self) -> crate::core::Result<&str> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                crate::core::AppError::MissingCredential(
                    self.api_key_env
                        .clone()
                        .unwrap_or_else(|| format!("{} API key", self.name)),
                )
            })
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Callers are expected to have loaded `.env` beforehand if they want it.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use prime_gateway::core::config::AppConfig;
    ///
    /// let config = AppConfig::from_env().expect("invalid configuration");
    /// println!("listening on {}:{}", config.server.host, config.server.port);
    /// ```
    pub fn from_env() -> Result<Self> {
        let mut server = ServerConfig::default();
        if let Some(host) = env_non_empty("HOST") {
            server.host = host;
        }
        if let Some(port) = env_non_empty("PORT") {
            server.port = port
                .parse::<u16>()
                .with_context(|| format!("PORT must be a valid port number, got '{}'", port))?;
        }

        let verify_ssl = env_non_empty("VERIFY_SSL")
            .map(|v| str_to_bool(&v))
            .unwrap_or_else(default_verify_ssl);

        let chat = ChatConfig {
            provider: ProviderConfig {
                name: "openrouter".to_string(),
                endpoint_url: env_or("OPENROUTER_URL", DEFAULT_CHAT_URL),
                model_id: None,
                api_key: env_non_empty("OPENROUTER_API_KEY"),
                api_key_env: Some("OPENROUTER_API_KEY".to_string()),
                timeout_secs: CHAT_TIMEOUT_SECS,
            },
            llama_model: env_or("LLAMA_MODEL", DEFAULT_LLAMA_MODEL),
            deepseek_model: env_or("DEEPSEEK_MODEL", DEFAULT_DEEPSEEK_MODEL),
            gpt_oss_model: env_or("GPT_OSS_MODEL", DEFAULT_GPT_OSS_MODEL),
        };

        let search = ProviderConfig {
            name: "serper".to_string(),
            endpoint_url: env_or("SERPER_URL", DEFAULT_SEARCH_URL),
            model_id: None,
            api_key: env_non_empty("SERPER_API_KEY"),
            api_key_env: Some("SERPER_API_KEY".to_string()),
            timeout_secs: SEARCH_TIMEOUT_SECS,
        };

        let image = ProviderConfig {
            name: "text2img".to_string(),
            endpoint_url: env_or("IMAGE_URL", DEFAULT_IMAGE_URL),
            model_id: Some(env_or("IMAGE_MODEL", DEFAULT_IMAGE_MODEL)),
            api_key: None,
            api_key_env: None,
            timeout_secs: IMAGE_TIMEOUT_SECS,
        };

        let cert_log = ProviderConfig {
            name: "crt.sh".to_string(),
            endpoint_url: env_or("CRT_SH_URL", DEFAULT_CERT_LOG_URL),
            model_id: None,
            api_key: None,
            api_key_env: None,
            timeout_secs: CERT_LOG_TIMEOUT_SECS,
        };

        Ok(Self {
            server,
            verify_ssl,
            chat,
            search,
            image,
            cert_log,
        })
    }

    /// Names of credential variables that are required but unset.
    pub fn missing_credentials(&self) -> Vec<&str> {
        [&self.chat.provider, &self.search]
            .into_iter()
            .filter(|p| p.api_key.as_deref().map_or(true, str::is_empty))
            .filter_map(|p| p.api_key_env.as_deref())
            .collect()
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn env_or(name: &str, default: &str) -> String {
    env_non_empty(name).unwrap_or_else(|| default.to_string())
}

/// Convert string to boolean.
///
/// Accepts: "true", "1", "yes", "on" (case-insensitive)
fn str_to_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}
