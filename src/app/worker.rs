use std::sync::{Arc, Mutex};

use anyhow::Result;
use log::{debug, error, info};
use tokio::sync::mpsc::Receiver;

use crate::integrations::model::common::ConnectionId;
use crate::integrations::traits::IntegrationClient;

use super::state::App;

pub struct Worker {
    app: Arc<Mutex<App>>,
    rx: Receiver<WorkerMessage>,
    client: Arc<dyn IntegrationClient>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkerMessage {
    /// Fetch integration services and connections concurrently
    LoadPage,
    DeleteConnection {
        id: ConnectionId,
    },
}

impl Worker {
    pub fn new(
        app: Arc<Mutex<App>>,
        rx_worker: Receiver<WorkerMessage>,
        client: Arc<dyn IntegrationClient>,
    ) -> Self {
        Worker {
            app,
            rx: rx_worker,
            client,
        }
    }

    pub async fn process_message(&mut self, message: WorkerMessage) -> Result<()> {
        {
            let mut app = self.app.lock().unwrap();
            app.loading = true;
        }

        match message {
            WorkerMessage::LoadPage => {
                debug!("Loading integrations page from {}", self.client.base_url());
                let app = &self.app;
                let client = &self.client;

                // Each slot is filled as soon as its own request resolves
                let services = async {
                    let result = client.list_connectors().await;
                    app.lock().unwrap().integrations.services_loaded(result);
                };
                let connections = async {
                    let result = client.list_connections().await;
                    app.lock().unwrap().integrations.connections_loaded(result);
                };
                futures::join!(services, connections);
            }
            WorkerMessage::DeleteConnection { id } => {
                match self.client.delete_connection(&id).await {
                    Ok(()) => {
                        info!("Removed connection {id}");
                        let mut app = self.app.lock().unwrap();
                        app.integrations.delete_succeeded(&id);
                    }
                    Err(e) => {
                        error!("Failed to remove connection {id}: {e:#}");
                        let mut app = self.app.lock().unwrap();
                        app.integrations.delete_failed(&id, format!("{e:#}"));
                    }
                }
            }
        }

        let mut app = self.app.lock().unwrap();
        app.loading = false;
        Ok(())
    }

    pub async fn run(&mut self) -> Result<()> {
        while let Some(message) = self.rx.recv().await {
            self.process_message(message).await?;
        }
        debug!("Worker channel closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::model::integrations::LoadState;
    use crate::integrations::client::create_client;
    use crate::integrations::config::LinkrsConfig;

    const CONNECTIONS_BODY: &str = r#"[
        {"id": 42, "integration": "Kafka", "name": "Orders stream", "source": "Carbon",
         "entity": "ABC Group Ltd", "interval": "Hourly", "icon": "kafka.png"},
        {"id": "pbi-7", "integration": "Power BI", "name": "Board pack", "source": "Manual",
         "entity": "ABC Group Ltd", "interval": "Daily", "icon": "powerbi.png"}
    ]"#;

    const CONNECTORS_BODY: &str = r#"[
        {"id": 1, "name": "Kafka", "description": "Real-time data streaming.", "icon": "kafka.png"}
    ]"#;

    fn worker_for(url: &str) -> (Worker, Arc<Mutex<App>>) {
        let config = LinkrsConfig::new();
        let app = Arc::new(Mutex::new(App::new(config.clone())));
        let client = create_client(&config, Some(url)).unwrap();
        let (_tx, rx) = tokio::sync::mpsc::channel(1);
        (Worker::new(app.clone(), rx, client), app)
    }

    fn connection_ids(app: &Arc<Mutex<App>>) -> Vec<ConnectionId> {
        let app = app.lock().unwrap();
        app.integrations
            .connections
            .loaded()
            .unwrap()
            .iter()
            .map(|c| c.id.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_load_page_fills_both_slots() {
        let mut server = mockito::Server::new_async().await;
        let connectors = server
            .mock("GET", "/connectors")
            .with_status(200)
            .with_body(CONNECTORS_BODY)
            .create_async()
            .await;
        let connections = server
            .mock("GET", "/connections")
            .with_status(200)
            .with_body(CONNECTIONS_BODY)
            .create_async()
            .await;

        let (mut worker, app) = worker_for(&server.url());
        worker.process_message(WorkerMessage::LoadPage).await.unwrap();

        connectors.assert_async().await;
        connections.assert_async().await;
        let guard = app.lock().unwrap();
        assert_eq!(guard.integrations.services.loaded().unwrap().len(), 1);
        assert_eq!(guard.integrations.connections.loaded().unwrap().len(), 2);
        assert!(!guard.loading);
    }

    #[tokio::test]
    async fn test_load_page_with_failing_slot() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/connectors")
            .with_status(500)
            .create_async()
            .await;
        server
            .mock("GET", "/connections")
            .with_status(200)
            .with_body(CONNECTIONS_BODY)
            .create_async()
            .await;

        let (mut worker, app) = worker_for(&server.url());
        worker.process_message(WorkerMessage::LoadPage).await.unwrap();

        let guard = app.lock().unwrap();
        assert!(matches!(guard.integrations.services, LoadState::Failed(_)));
        assert!(guard.integrations.connections.loaded().is_some());
        assert!(guard.integrations.page_error().is_some());
    }

    #[tokio::test]
    async fn test_delete_success_removes_connection() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/connections")
            .with_status(200)
            .with_body(CONNECTIONS_BODY)
            .create_async()
            .await;
        server
            .mock("GET", "/connectors")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/connections/42")
            .with_status(204)
            .create_async()
            .await;

        let (mut worker, app) = worker_for(&server.url());
        worker.process_message(WorkerMessage::LoadPage).await.unwrap();
        app.lock()
            .unwrap()
            .integrations
            .pending_deletes
            .insert(ConnectionId::Number(42));

        worker
            .process_message(WorkerMessage::DeleteConnection {
                id: ConnectionId::Number(42),
            })
            .await
            .unwrap();

        delete.assert_async().await;
        assert_eq!(connection_ids(&app), vec![ConnectionId::from("pbi-7")]);
        assert!(app.lock().unwrap().integrations.pending_deletes.is_empty());
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_connection() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/connections")
            .with_status(200)
            .with_body(CONNECTIONS_BODY)
            .create_async()
            .await;
        server
            .mock("GET", "/connectors")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;
        server
            .mock("DELETE", "/connections/42")
            .with_status(500)
            .create_async()
            .await;

        let (mut worker, app) = worker_for(&server.url());
        worker.process_message(WorkerMessage::LoadPage).await.unwrap();
        worker
            .process_message(WorkerMessage::DeleteConnection {
                id: ConnectionId::Number(42),
            })
            .await
            .unwrap();

        assert_eq!(connection_ids(&app).len(), 2);
        let guard = app.lock().unwrap();
        assert!(guard.integrations.error_popup.is_some());
    }
}
