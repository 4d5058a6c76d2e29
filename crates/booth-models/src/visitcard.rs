//! Visitcard records for shareable results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a stored visitcard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisitcardId(pub String);

impl VisitcardId {
    /// Generate a new random visitcard ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for VisitcardId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VisitcardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted shareable result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visitcard {
    /// Record id
    pub id: VisitcardId,

    /// The temporary upstream URL the GIF was fetched from
    pub original_url: String,

    /// File name under the media root
    pub file_name: String,

    /// Size of the stored GIF in bytes
    pub file_size: u64,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Caller-supplied metadata, stored verbatim
    #[serde(default)]
    pub metadata: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visitcard_ids_are_unique() {
        assert_ne!(VisitcardId::new(), VisitcardId::new());
    }

    #[test]
    fn test_visitcard_roundtrip() {
        let card = Visitcard {
            id: VisitcardId::new(),
            original_url: "https://example.com/out.gif".to_string(),
            file_name: "gif-abc.gif".to_string(),
            file_size: 1024,
            created_at: Utc::now(),
            metadata: serde_json::json!({"gif": "dance.gif"}),
        };

        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("originalUrl"));
        let back: Visitcard = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, card.id);
        assert_eq!(back.file_size, 1024);
    }
}
