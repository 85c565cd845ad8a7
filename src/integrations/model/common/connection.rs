use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Source tag that gets highlighted in the connections table
pub const SOURCE_CARBON: &str = "Carbon";

/// Connection identifiers are opaque: the API hands out either numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConnectionId {
    Number(i64),
    Text(String),
}

impl Display for ConnectionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionId::Number(id) => write!(f, "{id}"),
            ConnectionId::Text(id) => write!(f, "{id}"),
        }
    }
}

impl From<i64> for ConnectionId {
    fn from(id: i64) -> Self {
        ConnectionId::Number(id)
    }
}

impl From<&str> for ConnectionId {
    fn from(id: &str) -> Self {
        ConnectionId::Text(id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: ConnectionId,
    pub integration: String,
    pub name: String,
    pub source: String,
    pub entity: String,
    pub interval: String,
    pub icon: String,
}

impl Connection {
    pub fn is_carbon(&self) -> bool {
        self.source == SOURCE_CARBON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_id_display() {
        assert_eq!(ConnectionId::Number(42).to_string(), "42");
        assert_eq!(ConnectionId::from("conn-a").to_string(), "conn-a");
    }

    #[test]
    fn test_connection_id_untagged_json() {
        let ids: Vec<ConnectionId> = serde_json::from_str(r#"[42, "abc"]"#).unwrap();
        assert_eq!(ids, vec![ConnectionId::Number(42), ConnectionId::from("abc")]);
    }
}
