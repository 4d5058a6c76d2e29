//! Shared data models for the Swapbooth kiosk backend.
//!
//! This crate provides Serde-serializable types for:
//! - Predictions and their lifecycle status
//! - Warm-trigger events
//! - Visitcard records

pub mod prediction;
pub mod trigger;
pub mod visitcard;

// Re-export common types
pub use prediction::{Prediction, PredictionId, PredictionRequest, PredictionStatus};
pub use trigger::TriggerKind;
pub use visitcard::{Visitcard, VisitcardId};
