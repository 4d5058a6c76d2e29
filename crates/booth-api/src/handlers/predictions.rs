//! Prediction handlers: create, status, warm.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use booth_models::{Prediction, PredictionId, PredictionRequest};
use booth_predict::assets;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreatePredictionRequest {
    pub source: Option<String>,
    pub target: Option<String>,
}

/// Create a face-swap prediction from the visitor photo and chosen GIF.
pub async fn create_prediction(
    State(state): State<AppState>,
    Json(body): Json<CreatePredictionRequest>,
) -> ApiResult<(StatusCode, Json<Prediction>)> {
    let (Some(source), Some(target)) = (body.source, body.target) else {
        return Err(ApiError::bad_request("Both source and target are required"));
    };

    let target = resolve_target(&state, target).await?;

    let prediction = state
        .predict
        .create(&PredictionRequest { source, target })
        .await?;

    info!(id = %prediction.id, "Prediction created");
    Ok((StatusCode::CREATED, Json(prediction)))
}

/// Inline gallery targets as data URIs; the inference service cannot reach
/// kiosk-local paths. HTTP URLs and already-inlined data pass through.
async fn resolve_target(state: &AppState, target: String) -> ApiResult<String> {
    if target.starts_with("http") || target.starts_with("data:") {
        return Ok(target);
    }

    let name = target.strip_prefix("/gifs/").unwrap_or(&target);
    Ok(assets::gif_data_uri(state.gallery.path_of(name)).await?)
}

/// Fetch the current state of a prediction.
pub async fn get_prediction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Prediction>> {
    let prediction = state.predict.get(&PredictionId::from_string(id)).await?;
    Ok(Json(prediction))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarmResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction_id: Option<PredictionId>,
    pub message: String,
}

/// Start a warm prediction without waiting for it.
///
/// Warm failures still answer 200 with `success=false`; this traffic must
/// never disturb the capture flow.
pub async fn warm_model(State(state): State<AppState>) -> Json<WarmResponse> {
    match state.warm.begin().await {
        Ok(prediction) => Json(WarmResponse {
            success: true,
            prediction_id: Some(prediction.id),
            message: "Model warming initiated".to_string(),
        }),
        Err(e) => {
            warn!("Warming failed but continuing normally: {}", e);
            Json(WarmResponse {
                success: false,
                prediction_id: None,
                message: format!("Warming failed but continuing normally: {e}"),
            })
        }
    }
}
