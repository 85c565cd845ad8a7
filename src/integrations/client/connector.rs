use anyhow::Result;
use async_trait::async_trait;
use log::debug;

use crate::integrations::{model::common::IntegrationService, traits::ConnectorOperations};

use super::model::connector::ConnectorResponse;
use super::{RestClient, CONNECTORS_ENDPOINT};

#[async_trait]
impl ConnectorOperations for RestClient {
    async fn list_connectors(&self) -> Result<Vec<IntegrationService>> {
        debug!("list_connectors called");
        let connectors: Vec<ConnectorResponse> = self.get_json(CONNECTORS_ENDPOINT).await?;
        debug!("Fetched {} connectors", connectors.len());
        Ok(connectors.into_iter().map(Into::into).collect())
    }
}
