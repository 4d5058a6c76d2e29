//! Prediction client error types.

use thiserror::Error;

pub type PredictResult<T> = Result<T, PredictError>;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("inference API token is not set")]
    MissingToken,

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("prediction failed: {0}")]
    PredictionFailed(String),

    #[error("status poll failed: {0}")]
    StatusPoll(String),

    #[error("prediction not terminal after {polls} polls")]
    PollTimeout { polls: u32 },

    #[error("asset error: {0}")]
    Asset(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
