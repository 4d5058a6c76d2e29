//! Warm probe: synthetic predictions that keep the upstream model loaded.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::info;

use booth_models::{Prediction, PredictionId, PredictionRequest, PredictionStatus};

use crate::assets;
use crate::client::PredictClient;
use crate::error::{PredictError, PredictResult};

/// Outcome of a completed warm attempt.
#[derive(Debug, Clone)]
pub struct WarmReport {
    /// The warm prediction that ran upstream
    pub prediction_id: PredictionId,
    /// Wall-clock time from create to terminal status
    pub elapsed: Duration,
}

/// Issues warm-up predictions against the real inference endpoint.
///
/// The input pair is fixed at construction: a generated placeholder photo
/// and a small reference GIF. Warm traffic has no user-visible output; it
/// exists only so the next real request finds the model resident.
pub struct WarmProbe {
    client: Arc<PredictClient>,
    input: PredictionRequest,
}

impl WarmProbe {
    /// Create a probe with an already-inlined target (data URI or URL).
    pub fn new(client: Arc<PredictClient>, target: String) -> PredictResult<Self> {
        Ok(Self {
            client,
            input: PredictionRequest {
                source: assets::placeholder_face_jpeg()?,
                target,
            },
        })
    }

    /// Create a probe whose target is a local reference GIF.
    pub async fn with_reference_gif(
        client: Arc<PredictClient>,
        gif_path: impl AsRef<std::path::Path>,
    ) -> PredictResult<Self> {
        let target = assets::gif_data_uri(gif_path).await?;
        Self::new(client, target)
    }

    /// Create a warm prediction without waiting for it.
    ///
    /// Starting the prediction is enough to begin loading the model; this
    /// is what the kiosk's warm endpoint uses.
    pub async fn begin(&self) -> PredictResult<Prediction> {
        info!("Creating warm prediction");
        self.client.create(&self.input).await
    }

    /// Run one full warm attempt: create, then poll to a terminal state.
    pub async fn warm(&self) -> PredictResult<WarmReport> {
        let started = Instant::now();

        let created = self.client.create(&self.input).await?;
        info!(id = %created.id, "Warm prediction created, polling to completion");

        let finished = self.client.wait_for_terminal(&created.id).await?;

        if finished.status == PredictionStatus::Succeeded {
            let report = WarmReport {
                prediction_id: finished.id,
                elapsed: started.elapsed(),
            };
            info!(id = %report.prediction_id, elapsed = ?report.elapsed, "Warm attempt succeeded");
            Ok(report)
        } else {
            Err(PredictError::PredictionFailed(
                finished.error.unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}
