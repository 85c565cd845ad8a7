pub mod connection;
pub mod connector;
