//! Warm-trigger events.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What caused a warm-up trigger.
///
/// Carries no payload; the scheduler only cares that a trigger arrived and
/// uses the kind for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    /// Frame-difference motion in the camera feed
    Motion,
    /// A pointer/touch event anywhere in the kiosk UI
    Interaction,
}

impl TriggerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerKind::Motion => "motion",
            TriggerKind::Interaction => "interaction",
        }
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
