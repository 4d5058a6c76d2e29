//! API configuration.

/// API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Directory holding the selectable GIFs
    pub gif_dir: String,
    /// Directory where visitcards are persisted
    pub media_root: String,
    /// Gallery file used as the warm probe's reference target
    pub warm_reference_gif: String,
    /// Environment (development/production)
    pub environment: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            gif_dir: "public/gifs".to_string(),
            media_root: "media/visitcards".to_string(),
            warm_reference_gif: "thumbs_up.gif".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl ApiConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("API_HOST").unwrap_or(defaults.host),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            gif_dir: std::env::var("GIF_DIR").unwrap_or(defaults.gif_dir),
            media_root: std::env::var("MEDIA_ROOT").unwrap_or(defaults.media_root),
            warm_reference_gif: std::env::var("WARM_REFERENCE_GIF")
                .unwrap_or(defaults.warm_reference_gif),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
        }
    }

    /// Check if running in production mode.
    pub fn is_production(&self) -> bool {
        self.environment.to_lowercase() == "production"
    }
}
