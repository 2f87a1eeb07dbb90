//! Image generation through a URL-addressed text-to-image endpoint.
//!
//! The endpoint renders on GET, so the gateway only probes the constructed URL
//! and hands it back; the image bytes are never read.

use crate::core::config::DEFAULT_IMAGE_MODEL;
use crate::core::{AppError, ProviderConfig, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub url: String,
}

/// Percent-encode a query value, leaving `/` literal.
fn encode_keeping_slash(value: &str) -> String {
    urlencoding::encode(value).replace("%2F", "/")
}

/// Build `<endpoint>?prompt=<percent-encoded>&model=<model>`.
pub fn image_url(provider: &ProviderConfig, prompt: &str) -> String {
    let model = provider.model_id.as_deref().unwrap_or(DEFAULT_IMAGE_MODEL);
    format!(
        "{}?prompt={}&model={}",
        provider.endpoint_url,
        encode_keeping_slash(prompt),
        encode_keeping_slash(model)
    )
}

#[tracing::instrument(skip(client, provider))]
pub async fn generate(
    client: &reqwest::Client,
    provider: &ProviderConfig,
    prompt: &str,
) -> Result<GeneratedImage> {
    let url = image_url(provider, prompt);

    super::observe_upstream(&provider.name, async {
        let response = client
            .get(&url)
            .timeout(provider.timeout())
            .send()
            .await?;

        if response.status() != reqwest::StatusCode::OK {
            tracing::warn!(status = %response.status(), "Image endpoint rejected prompt");
            return Err(AppError::ImageGenerationFailed);
        }

        Ok(GeneratedImage { url: url.clone() })
    })
    .await
}
