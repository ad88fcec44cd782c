use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A globally unique trade identifier.
///
/// Ids are built from a millisecond timestamp prefix and a random suffix, so
/// they sort roughly by creation time and are collision-resistant without any
/// coordination between writers. The id string doubles as the record's key in
/// the key-addressed store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeId(String);

impl TradeId {
    /// Allocates a fresh id, e.g. `trade:1722945600123:9f8a2b1c`.
    pub fn generate() -> Self {
        let millis = Utc::now().timestamp_millis();
        let suffix = Uuid::new_v4().simple().to_string();
        TradeId(format!("trade:{}:{}", millis, &suffix[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TradeId {
    fn from(value: String) -> Self {
        TradeId(value)
    }
}

impl From<&str> for TradeId {
    fn from(value: &str) -> Self {
        TradeId(value.to_string())
    }
}
