use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Method;

use crate::integrations::{
    model::common::{Connection, ConnectionId},
    traits::ConnectionOperations,
};

use super::model::connection::ConnectionResponse;
use super::{RestClient, CONNECTIONS_ENDPOINT};

#[async_trait]
impl ConnectionOperations for RestClient {
    async fn list_connections(&self) -> Result<Vec<Connection>> {
        debug!("list_connections called");
        let connections: Vec<ConnectionResponse> = self.get_json(CONNECTIONS_ENDPOINT).await?;
        debug!("Fetched {} connections", connections.len());
        Ok(connections.into_iter().map(Into::into).collect())
    }

    async fn delete_connection(&self, connection_id: &ConnectionId) -> Result<()> {
        debug!("delete_connection called for connection_id: {connection_id}");
        let id = connection_id.to_string();
        self.base_api(Method::DELETE, CONNECTIONS_ENDPOINT, Some(&id))?
            .send()
            .await?
            .error_for_status()?;
        info!("Deleted connection {connection_id}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::client::base::BaseClient;
    use crate::integrations::config::LinkrsConfig;

    fn client_for(server: &mockito::ServerGuard) -> RestClient {
        RestClient::new(BaseClient::new(server.url(), &LinkrsConfig::default()).unwrap())
    }

    #[tokio::test]
    async fn test_list_connections() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/connections")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"id": 42, "integration": "Kafka", "name": "Orders stream", "source": "Carbon",
                     "entity": "ABC Group Ltd", "interval": "Hourly", "icon": "/images/kafka.png"},
                    {"id": "pbi-1", "integration": "Power BI", "name": "Board pack"}
                ]"#,
            )
            .create_async()
            .await;

        let connections = client_for(&server).list_connections().await.unwrap();
        mock.assert_async().await;

        assert_eq!(connections.len(), 2);
        assert_eq!(connections[0].id, ConnectionId::Number(42));
        assert!(connections[0].is_carbon());
        assert_eq!(connections[1].id, ConnectionId::from("pbi-1"));
        assert_eq!(connections[1].interval, "");
    }

    #[tokio::test]
    async fn test_list_connections_bad_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/connections")
            .with_status(200)
            .with_body(r#"{"connections": "nope"}"#)
            .create_async()
            .await;

        let err = client_for(&server).list_connections().await.unwrap_err();
        assert!(err.to_string().contains("Failed to decode response"));
    }

    #[tokio::test]
    async fn test_delete_connection() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/connections/42")
            .with_status(204)
            .create_async()
            .await;

        client_for(&server)
            .delete_connection(&ConnectionId::Number(42))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_connection_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", "/connections/42")
            .with_status(404)
            .create_async()
            .await;

        let result = client_for(&server)
            .delete_connection(&ConnectionId::Number(42))
            .await;
        assert!(result.is_err());
    }
}
