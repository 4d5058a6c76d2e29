//! Prediction types for the face-swap inference service.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Unique identifier for an upstream prediction.
///
/// Ids are assigned by the inference service; this side only carries them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionId(pub String);

impl PredictionId {
    /// Create from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PredictionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Prediction lifecycle status.
///
/// The four values below are the whole contract this backend relies on.
/// Anything else the upstream service reports deserializes as `Pending`,
/// which keeps it non-terminal and safe to keep polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PredictionStatus {
    /// Prediction accepted, waiting for a worker
    #[default]
    Pending,
    /// Prediction is actively being processed
    Processing,
    /// Prediction completed successfully
    Succeeded,
    /// Prediction failed with an error
    Failed,
}

impl PredictionStatus {
    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PredictionStatus::Pending => "pending",
            PredictionStatus::Processing => "processing",
            PredictionStatus::Succeeded => "succeeded",
            PredictionStatus::Failed => "failed",
        }
    }

    /// Check if this is a terminal state (no more updates expected).
    pub fn is_terminal(&self) -> bool {
        matches!(self, PredictionStatus::Succeeded | PredictionStatus::Failed)
    }
}

impl fmt::Display for PredictionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<'de> Deserialize<'de> for PredictionStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "processing" => PredictionStatus::Processing,
            "succeeded" => PredictionStatus::Succeeded,
            "failed" => PredictionStatus::Failed,
            // "pending", plus transient upstream states such as "starting"
            _ => PredictionStatus::Pending,
        })
    }
}

/// A prediction as reported by the inference service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Upstream prediction id
    pub id: PredictionId,

    /// Current status
    #[serde(default)]
    pub status: PredictionStatus,

    /// Output URL once the prediction has succeeded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Error message for failed predictions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Upstream processing logs, when the service includes them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logs: Option<String>,
}

impl Prediction {
    /// Check if the prediction is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// Input pair for creating a prediction.
///
/// Both fields are data URIs or HTTP URLs, matching what the inference
/// service accepts for the face-swap model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    /// Visitor photo (the face to transplant)
    pub source: String,
    /// Animated GIF to swap the face into
    pub target: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_terminal() {
        assert!(!PredictionStatus::Pending.is_terminal());
        assert!(!PredictionStatus::Processing.is_terminal());
        assert!(PredictionStatus::Succeeded.is_terminal());
        assert!(PredictionStatus::Failed.is_terminal());
    }

    #[test]
    fn test_status_roundtrip() {
        let s: PredictionStatus = serde_json::from_str("\"processing\"").unwrap();
        assert_eq!(s, PredictionStatus::Processing);
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"processing\"");
    }

    #[test]
    fn test_unknown_status_is_pending() {
        // Upstream sometimes reports transient states like "starting"
        let s: PredictionStatus = serde_json::from_str("\"starting\"").unwrap();
        assert_eq!(s, PredictionStatus::Pending);
        assert!(!s.is_terminal());
    }

    #[test]
    fn test_prediction_deserializes_sparse_body() {
        let p: Prediction = serde_json::from_str(r#"{"id":"abc","status":"succeeded"}"#).unwrap();
        assert_eq!(p.id.as_str(), "abc");
        assert!(p.is_terminal());
        assert!(p.output.is_none());
        assert!(p.error.is_none());
    }
}
