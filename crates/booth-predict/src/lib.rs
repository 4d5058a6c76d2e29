//! Client for the face-swap inference service.
//!
//! This crate provides the one HTTP contract the kiosk relies on: create a
//! prediction from a (source, target) pair, read its status, and poll it to
//! a terminal state. The warm probe builds on the same client to issue the
//! low-cost synthetic requests that keep the upstream model resident.

pub mod assets;
pub mod client;
pub mod error;
pub mod warm;

pub use client::{PredictClient, PredictConfig};
pub use error::{PredictError, PredictResult};
pub use warm::{WarmProbe, WarmReport};
