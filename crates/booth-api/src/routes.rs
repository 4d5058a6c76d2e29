//! API routes.

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::gifs::list_gifs;
use crate::handlers::health::health;
use crate::handlers::predictions::{create_prediction, get_prediction, warm_model};
use crate::handlers::visitcards::{create_visitcard, get_visitcard};
use crate::state::AppState;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/gifs", get(list_gifs))
        .route("/predictions", post(create_prediction))
        .route("/predictions/warm", post(warm_model))
        .route("/predictions/:id", get(get_prediction))
        .route("/visitcards", post(create_visitcard).get(get_visitcard));

    // The kiosk UI is served from another origin on the same device
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
