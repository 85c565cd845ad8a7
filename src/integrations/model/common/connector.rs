use serde::{Deserialize, Serialize};

/// A third-party service that connections can be created for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationService {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
}
