//! Domain analysis: IPv4 resolution plus subdomain discovery from
//! certificate-transparency logs.
//!
//! Resolution failure fails the request. Subdomain discovery is best-effort:
//! any failure there degrades to [`FETCH_ERROR_SENTINEL`] and the report is
//! still returned.

use crate::core::metrics::get_metrics;
use crate::core::{AppError, ProviderConfig, Result};
use futures::future::BoxFuture;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::io;
use std::net::{IpAddr, Ipv4Addr};

/// Placeholder subdomain list when the certificate log could not be read.
pub const FETCH_ERROR_SENTINEL: &str = "Error fetching";

/// Certificate entries inspected per lookup.
pub const MAX_CERT_ENTRIES: usize = 50;

/// Subdomains returned per lookup.
pub const MAX_SUBDOMAINS: usize = 15;

/// Forward host name resolution.
pub trait HostResolver: Send + Sync {
    fn resolve_ipv4<'a>(&'a self, host: &'a str) -> BoxFuture<'a, io::Result<Ipv4Addr>>;
}

/// Resolver backed by the operating system (`getaddrinfo`).
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemResolver;

impl HostResolver for SystemResolver {
    fn resolve_ipv4<'a>(&'a self, host: &'a str) -> BoxFuture<'a, io::Result<Ipv4Addr>> {
        Box::pin(async move {
            if host.is_empty() {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "empty host name",
                ));
            }

            tokio::net::lookup_host((host, 0))
                .await?
                .find_map(|addr| match addr.ip() {
                    IpAddr::V4(v4) => Some(v4),
                    IpAddr::V6(_) => None,
                })
                .ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::NotFound,
                        format!("no IPv4 address found for {}", host),
                    )
                })
        })
    }
}

/// Reduce a user-supplied domain or URL to a bare host name.
///
/// Strips an `http://`/`https://` scheme, then any path, then any port. Case
/// is left untouched.
///
/// # Examples
///
/// ```
/// use prime_gateway::services::domain::normalize_domain;
///
/// assert_eq!(normalize_domain("https://Example.com/path:8080"), "Example.com");
/// assert_eq!(normalize_domain("example.com:443"), "example.com");
/// ```
pub fn normalize_domain(input: &str) -> String {
    let mut host = input;
    if host.starts_with("http://") || host.starts_with("https://") {
        if let Some((_, rest)) = host.split_once("//") {
            host = rest;
        }
    }
    let host = host.split('/').next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();
    host.to_string()
}

/// One certificate-transparency search hit. `name_value` holds one or more
/// newline-separated names.
#[derive(Debug, Deserialize)]
pub struct CertEntry {
    #[serde(default)]
    pub name_value: Option<String>,
}

/// Collect names containing `host`: deduplicated, sorted, at most
/// [`MAX_SUBDOMAINS`].
pub fn collect_subdomains<I>(entries: I, host: &str) -> Vec<String>
where
    I: IntoIterator<Item = CertEntry>,
{
    let found: BTreeSet<String> = entries
        .into_iter()
        .take(MAX_CERT_ENTRIES)
        .filter_map(|entry| entry.name_value)
        .flat_map(|names| {
            names
                .split('\n')
                .map(str::trim)
                .filter(|name| name.contains(host))
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect();

    found.into_iter().take(MAX_SUBDOMAINS).collect()
}

/// Query the certificate log for `%.<host>`.
pub async fn fetch_subdomains(
    client: &reqwest::Client,
    provider: &ProviderConfig,
    host: &str,
) -> Result<Vec<String>> {
    let pattern = format!("%.{}", host);

    super::observe_upstream(&provider.name, async {
        let response = client
            .get(&provider.endpoint_url)
            .query(&[("q", pattern.as_str()), ("output", "json")])
            .timeout(provider.timeout())
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(AppError::Upstream(format!(
                "Certificate log returned {}",
                status
            )));
        }

        let body = response.bytes().await?;
        let entries: Vec<serde_json::Value> = serde_json::from_slice(&body)?;
        let entries = entries
            .into_iter()
            .take(MAX_CERT_ENTRIES)
            .map(serde_json::from_value::<CertEntry>)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(collect_subdomains(entries, host))
    })
    .await
}

/// [`fetch_subdomains`] with failures replaced by the sentinel list.
pub async fn lookup_subdomains(
    client: &reqwest::Client,
    provider: &ProviderConfig,
    host: &str,
) -> Vec<String> {
    match fetch_subdomains(client, provider, host).await {
        Ok(subdomains) => subdomains,
        Err(e) => {
            tracing::warn!(host = %host, error = %e, "Subdomain lookup failed, using fallback");
            get_metrics().subdomain_fallbacks.inc();
            vec![FETCH_ERROR_SENTINEL.to_string()]
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainReport {
    pub domain: String,
    pub ip: Ipv4Addr,
    pub subdomains: Vec<String>,
}

/// Normalize, resolve, then enumerate subdomains, in that order.
#[tracing::instrument(skip(client, provider, resolver))]
pub async fn analyze(
    client: &reqwest::Client,
    provider: &ProviderConfig,
    resolver: &dyn HostResolver,
    input: &str,
) -> Result<DomainReport> {
    let domain = normalize_domain(input);

    let ip = resolver.resolve_ipv4(&domain).await.map_err(|e| {
        tracing::warn!(domain = %domain, error = %e, "Host resolution failed");
        AppError::Resolve(e)
    })?;
    tracing::debug!(domain = %domain, ip = %ip, "Host resolved");

    let subdomains = lookup_subdomains(client, provider, &domain).await;

    Ok(DomainReport {
        domain,
        ip,
        subdomains,
    })
}
