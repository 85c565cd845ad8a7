use anyhow::Result;
use async_trait::async_trait;

use crate::integrations::model::common::IntegrationService;

#[async_trait]
pub trait ConnectorOperations: Send + Sync {
    async fn list_connectors(&self) -> Result<Vec<IntegrationService>>;
}
