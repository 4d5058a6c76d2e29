//! Motion-triggered pre-warming engine.
//!
//! Watches a live camera feed through a [`FrameSource`], detects motion by
//! frame differencing at a reduced working resolution, and opportunistically
//! issues warm-up calls to the face-swap inference service so that the next
//! real request finds the model already loaded.
//!
//! The engine runs as a single cooperative tokio task; all warming state is
//! owned by that task, so independent camera sessions never share state.

pub mod config;
pub mod detector;
pub mod engine;
pub mod frame;
pub mod scheduler;

pub use config::WarmerConfig;
pub use detector::{MotionDetector, MotionVerdict};
pub use engine::{MotionWarmer, WarmClient, WarmEvent, WarmerHandle};
pub use frame::{FrameSource, PixelBuffer};
pub use scheduler::{SkipReason, TriggerDecision, WarmPhase, WarmScheduler};
