pub mod base;
pub mod model;

mod connection;
mod connector;

use std::sync::Arc;

use anyhow::Result;
use log::{debug, error};
use reqwest::Method;
use serde::de::DeserializeOwned;

use self::base::BaseClient;
use crate::integrations::config::LinkrsConfig;
use crate::integrations::traits::IntegrationClient;

pub const CONNECTORS_ENDPOINT: &str = "/connectors";
pub const CONNECTIONS_ENDPOINT: &str = "/connections";

/// REST client for the integrations API
#[derive(Debug, Clone)]
pub struct RestClient {
    base: BaseClient,
}

impl RestClient {
    pub fn new(base: BaseClient) -> Self {
        Self { base }
    }

    fn base_api(
        &self,
        method: Method,
        endpoint: &str,
        segment: Option<&str>,
    ) -> Result<reqwest::RequestBuilder> {
        self.base.base_api(method, endpoint, segment)
    }

    /// GET `endpoint` and decode the JSON body, logging the raw body when decoding fails
    async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let response = self
            .base_api(Method::GET, endpoint, None)?
            .send()
            .await?
            .error_for_status()?;

        let response_text = response.text().await?;
        match serde_json::from_str(&response_text) {
            Ok(decoded) => Ok(decoded),
            Err(e) => {
                error!("Failed to decode {endpoint} response. Error: {e}");
                error!(
                    "Response body (first 500 chars): {}",
                    response_text.chars().take(500).collect::<String>()
                );
                Err(anyhow::anyhow!(
                    "Failed to decode response: {e}. Check debug log for response body."
                ))
            }
        }
    }
}

impl IntegrationClient for RestClient {
    fn base_url(&self) -> &str {
        &self.base.base_url
    }
}

pub fn create_client(
    config: &LinkrsConfig,
    api_url_override: Option<&str>,
) -> Result<Arc<dyn IntegrationClient>> {
    let base_url = config.resolve_api_url(api_url_override)?;
    debug!("Creating REST client for {base_url}");
    let base = BaseClient::new(base_url, config)?;
    Ok(Arc::new(RestClient::new(base)))
}
