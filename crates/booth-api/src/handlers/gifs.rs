//! GIF gallery handlers.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Serialize)]
pub struct GifListing {
    pub gifs: Vec<String>,
}

/// List the GIFs available for selection.
pub async fn list_gifs(State(state): State<AppState>) -> ApiResult<Json<GifListing>> {
    let gifs = state.gallery.list().await?;
    Ok(Json(GifListing { gifs }))
}
