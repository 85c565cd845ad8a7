use serde::{Deserialize, Serialize};

use crate::integrations::model::common::IntegrationService;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectorResponse {
    pub id: serde_json::Value,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl From<ConnectorResponse> for IntegrationService {
    fn from(c: ConnectorResponse) -> Self {
        IntegrationService {
            // Some backends number their connectors; keep the id textual either way
            id: match c.id {
                serde_json::Value::String(id) => id,
                other => other.to_string(),
            },
            name: c.name,
            description: c.description.unwrap_or_default(),
            icon: c.icon.unwrap_or_default(),
        }
    }
}
