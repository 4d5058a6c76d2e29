//! Local media storage.
//!
//! This crate provides:
//! - GIF gallery listing for the kiosk carousel
//! - Visitcard persistence (download + metadata record + lookup)

pub mod error;
pub mod gallery;
pub mod visitcard;

pub use error::{StorageError, StorageResult};
pub use gallery::GifGallery;
pub use visitcard::VisitcardStore;
