pub mod connection;
pub mod connector;

// Re-export common types for easier access
pub use connection::{Connection, ConnectionId, SOURCE_CARBON};
pub use connector::IntegrationService;
