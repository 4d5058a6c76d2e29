//! Application state.

use std::sync::Arc;

use booth_predict::{PredictClient, WarmProbe};
use booth_storage::{GifGallery, VisitcardStore};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub predict: Arc<PredictClient>,
    pub warm: Arc<WarmProbe>,
    pub gallery: GifGallery,
    pub visitcards: Arc<VisitcardStore>,
}

impl AppState {
    /// Create new application state.
    pub async fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let predict = Arc::new(PredictClient::from_env()?);
        let gallery = GifGallery::new(&config.gif_dir);

        // The warm probe inlines its reference GIF once at startup
        let warm = Arc::new(
            WarmProbe::with_reference_gif(
                Arc::clone(&predict),
                gallery.path_of(&config.warm_reference_gif),
            )
            .await?,
        );

        let visitcards = Arc::new(VisitcardStore::new(&config.media_root));

        Ok(Self {
            config,
            predict,
            warm,
            gallery,
            visitcards,
        })
    }
}
