//! Visitcard handlers.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use booth_models::{Visitcard, VisitcardId};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVisitcardRequest {
    pub gif_url: Option<String>,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVisitcardResponse {
    pub id: VisitcardId,
    pub storage_path: String,
    pub view_url: String,
    pub metadata: Visitcard,
}

/// Persist a generated result so it outlives the upstream's temporary URL.
pub async fn create_visitcard(
    State(state): State<AppState>,
    Json(body): Json<CreateVisitcardRequest>,
) -> ApiResult<Json<CreateVisitcardResponse>> {
    let Some(gif_url) = body.gif_url else {
        return Err(ApiError::bad_request("GIF URL is required"));
    };

    let card = state.visitcards.save_from_url(&gif_url, body.metadata).await?;

    Ok(Json(CreateVisitcardResponse {
        id: card.id.clone(),
        storage_path: state.visitcards.gif_path(&card).display().to_string(),
        view_url: format!("/view?id={}", card.id),
        metadata: card,
    }))
}

#[derive(Debug, Deserialize)]
pub struct VisitcardQuery {
    pub id: Option<String>,
}

/// Look up a stored visitcard by id.
pub async fn get_visitcard(
    State(state): State<AppState>,
    Query(query): Query<VisitcardQuery>,
) -> ApiResult<Json<Visitcard>> {
    let Some(id) = query.id else {
        return Err(ApiError::bad_request("ID parameter is required"));
    };

    let card = state.visitcards.fetch(&VisitcardId::from_string(id)).await?;
    Ok(Json(card))
}
