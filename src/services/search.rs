//! Web search through a Serper-style JSON search API.

use crate::core::{ProviderConfig, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of results requested from and returned to the client.
pub const MAX_RESULTS: usize = 10;

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    q: &'a str,
    num: usize,
}

/// Upstream search payload. Organic entries stay untyped until truncation.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub organic: Option<Vec<Value>>,
}

#[derive(Debug, Deserialize)]
pub struct OrganicResult {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

/// One projected search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

impl From<OrganicResult> for SearchHit {
    fn from(item: OrganicResult) -> Self {
        Self {
            title: item.title.unwrap_or_default(),
            link: item.link.unwrap_or_default(),
            snippet: item.snippet.unwrap_or_default(),
        }
    }
}

/// Project the first [`MAX_RESULTS`] organic entries. No `organic` key means
/// no results. Entries past the limit are never decoded.
pub fn project_results(response: SearchResponse) -> Result<Vec<SearchHit>> {
    let hits = response
        .organic
        .unwrap_or_default()
        .into_iter()
        .take(MAX_RESULTS)
        .map(|entry| serde_json::from_value::<OrganicResult>(entry).map(SearchHit::from))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(hits)
}

#[tracing::instrument(skip(client, provider))]
pub async fn search(
    client: &reqwest::Client,
    provider: &ProviderConfig,
    query: &str,
) -> Result<Vec<SearchHit>> {
    let api_key = provider.require_api_key()?;

    super::observe_upstream(&provider.name, async {
        let response = client
            .post(&provider.endpoint_url)
            .header("X-API-KEY", api_key)
            .timeout(provider.timeout())
            .json(&SearchRequest {
                q: query,
                num: MAX_RESULTS,
            })
            .send()
            .await?;

        let body = response.bytes().await?;
        let parsed: SearchResponse = serde_json::from_slice(&body)?;
        project_results(parsed)
    })
    .await
}
