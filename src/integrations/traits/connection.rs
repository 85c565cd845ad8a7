use anyhow::Result;
use async_trait::async_trait;

use crate::integrations::model::common::{Connection, ConnectionId};

#[async_trait]
pub trait ConnectionOperations: Send + Sync {
    async fn list_connections(&self) -> Result<Vec<Connection>>;
    async fn delete_connection(&self, connection_id: &ConnectionId) -> Result<()>;
}
