pub mod connection;
pub mod connector;

pub use connection::ConnectionOperations;
pub use connector::ConnectorOperations;

/// Every operation the integrations page needs from the API
pub trait IntegrationClient: ConnectorOperations + ConnectionOperations {
    /// Base URL all endpoints are resolved against
    fn base_url(&self) -> &str;
}
