//! Single-turn chat completions against an OpenAI-compatible endpoint.

use crate::core::{AppError, ChatConfig, Result};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The chat models exposed by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatModel {
    Llama,
    DeepSeek,
    GptOss,
}

impl ChatModel {
    /// Name reported in the `model` field of the envelope.
    pub fn display_name(self) -> &'static str {
        match self {
            ChatModel::Llama => "llama-3.3-70b",
            ChatModel::DeepSeek => "deepseek-r1",
            ChatModel::GptOss => "gpt-oss-120b",
        }
    }

    /// Whether the request asks the provider for reasoning traces.
    pub fn reasoning_enabled(self) -> bool {
        !matches!(self, ChatModel::Llama)
    }

    /// Upstream model id for this model.
    pub fn model_id(self, config: &ChatConfig) -> &str {
        match self {
            ChatModel::Llama => &config.llama_model,
            ChatModel::DeepSeek => &config.deepseek_model,
            ChatModel::GptOss => &config.gpt_oss_model,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<ReasoningOptions>,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
pub struct ReasoningOptions {
    pub enabled: bool,
}

impl<'a> ChatRequest<'a> {
    pub fn new(model: ChatModel, config: &'a ChatConfig, message: &'a str) -> Self {
        Self {
            model: model.model_id(config),
            messages: vec![ChatMessage {
                role: "user",
                content: message,
            }],
            reasoning: model
                .reasoning_enabled()
                .then_some(ReasoningOptions { enabled: true }),
        }
    }
}

/// Upstream chat-completions payload. Only the fields the gateway reads.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Option<Vec<Choice>>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
    /// `Some(Value::Null)` when the key is present with a null value.
    #[serde(default, deserialize_with = "present_value")]
    pub reasoning_details: Option<Value>,
}

fn present_value<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// The parts of a completion surfaced to the client.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    pub reply: String,
    pub reasoning: Option<Value>,
}

/// Map an upstream payload to a reply, first choice only.
pub fn extract_reply(model: ChatModel, response: ChatCompletionResponse) -> Result<ChatReply> {
    let choices = response.choices.ok_or(AppError::NoResponse)?;
    let first = choices
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Upstream("Upstream returned an empty 'choices' array".into()))?;
    let message = first
        .message
        .ok_or_else(|| AppError::Upstream("Upstream choice has no 'message'".into()))?;

    Ok(ChatReply {
        reply: message.content.unwrap_or_default(),
        reasoning: if model.reasoning_enabled() {
            message.reasoning_details
        } else {
            None
        },
    })
}

/// Send `message` to `model` and return the first choice.
///
/// The upstream HTTP status is not inspected: error payloads from the provider
/// lack `choices` and surface as [`AppError::NoResponse`].
#[tracing::instrument(skip(client, config, model, message), fields(model = model.display_name()))]
pub async fn complete(
    client: &reqwest::Client,
    config: &ChatConfig,
    model: ChatModel,
    message: &str,
) -> Result<ChatReply> {
    let provider = &config.provider;
    let api_key = provider.require_api_key()?;
    let payload = ChatRequest::new(model, config, message);

    super::observe_upstream(&provider.name, async {
        let response = client
            .post(&provider.endpoint_url)
            .bearer_auth(api_key)
            .timeout(provider.timeout())
            .json(&payload)
            .send()
            .await?;

        let body = response.bytes().await?;
        let parsed: ChatCompletionResponse = serde_json::from_slice(&body)?;
        extract_reply(model, parsed)
    })
    .await
}
