use serde::{Deserialize, Serialize};

use crate::integrations::model::common::{Connection, ConnectionId};

/// Wire shape of a connection. Text fields are optional on the wire so a sparse
/// record still decodes; missing values become empty strings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionResponse {
    pub id: ConnectionId,
    #[serde(default)]
    pub integration: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub entity: Option<String>,
    #[serde(default)]
    pub interval: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl From<ConnectionResponse> for Connection {
    fn from(c: ConnectionResponse) -> Self {
        Connection {
            id: c.id,
            integration: c.integration.unwrap_or_default(),
            name: c.name.unwrap_or_default(),
            source: c.source.unwrap_or_default(),
            entity: c.entity.unwrap_or_default(),
            interval: c.interval.unwrap_or_default(),
            icon: c.icon.unwrap_or_default(),
        }
    }
}
