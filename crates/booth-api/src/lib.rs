//! Axum HTTP API for the Swapbooth kiosk.
//!
//! This crate provides:
//! - The prediction proxy the kiosk UI talks to (create, status, warm)
//! - GIF gallery listing
//! - Visitcard persistence endpoints

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use state::AppState;
