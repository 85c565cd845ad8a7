use anyhow::{Context, Result};
use log::{debug, info};
use reqwest::{Method, Url};

use crate::integrations::config::{expand_env_vars, LinkrsConfig};

/// Build the fully-qualified URL for an endpoint relative to `base_url`.
///
/// A missing leading slash on the endpoint is added and a trailing slash on the
/// base is dropped, so `("http://host/", "connections")` and
/// `("http://host", "/connections")` both give `http://host/connections`.
pub fn api_url(base_url: &str, endpoint: &str) -> String {
    let base = base_url.trim_end_matches('/');
    if endpoint.starts_with('/') {
        format!("{base}{endpoint}")
    } else {
        format!("{base}/{endpoint}")
    }
}

/// Base HTTP client for the integrations API.
/// Holds the resolved base URL and provides request building.
#[derive(Debug, Clone)]
pub struct BaseClient {
    pub client: reqwest::Client,
    pub base_url: String,
}

impl BaseClient {
    pub fn new(base_url: String, config: &LinkrsConfig) -> Result<Self> {
        let mut client_builder = reqwest::Client::builder()
            .timeout(config.timeout())
            .use_rustls_tls();

        // Configure proxy if specified in config (takes priority)
        if let Some(proxy_url) = &config.proxy {
            let proxy_url = expand_env_vars(proxy_url)?;
            let proxy = reqwest::Proxy::all(&proxy_url)
                .with_context(|| format!("Invalid proxy URL: {}", proxy_url))?;
            client_builder = client_builder.proxy(proxy);
            info!("🔀 Using proxy from config: {}", proxy_url);
        }

        let client = client_builder.build()?;
        Ok(Self { client, base_url })
    }

    pub fn url(&self, endpoint: &str) -> Result<Url> {
        let url = api_url(&self.base_url, endpoint);
        Url::parse(&url).with_context(|| format!("Invalid request URL: {url}"))
    }

    /// Build a request for `endpoint`, optionally followed by one extra path segment
    /// (percent-encoded, used for resource ids).
    pub fn base_api(
        &self,
        method: Method,
        endpoint: &str,
        segment: Option<&str>,
    ) -> Result<reqwest::RequestBuilder> {
        let mut url = self.url(endpoint)?;
        if let Some(segment) = segment {
            url.path_segments_mut()
                .map_err(|()| anyhow::anyhow!("Base URL cannot carry a path: {}", self.base_url))?
                .pop_if_empty()
                .push(segment);
        }
        debug!("🔗 Request URL: {method} {url}");
        Ok(self.client.request(method, url))
    }
}
