//! Inference service HTTP client.

use std::time::Duration;

use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use booth_models::{Prediction, PredictionId, PredictionRequest};

use crate::error::{PredictError, PredictResult};

/// Face-swap model version submitted with every prediction.
const DEFAULT_MODEL_VERSION: &str =
    "974be35318aab27d78c8c935761e665620236d3b157a9b35385c7905c601d977";

/// Configuration for the prediction client.
#[derive(Debug, Clone)]
pub struct PredictConfig {
    /// Base URL of the inference service
    pub base_url: String,
    /// API token; requests are rejected locally when empty
    pub api_token: String,
    /// Model version hash
    pub model_version: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Delay between status polls
    pub poll_interval: Duration,
    /// Maximum number of status polls before an attempt is abandoned
    pub max_polls: u32,
}

impl Default for PredictConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.replicate.com".to_string(),
            api_token: String::new(),
            model_version: DEFAULT_MODEL_VERSION.to_string(),
            timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(2),
            max_polls: 150,
        }
    }
}

impl PredictConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("PREDICT_API_URL").unwrap_or(defaults.base_url),
            api_token: std::env::var("REPLICATE_API_TOKEN").unwrap_or_default(),
            model_version: std::env::var("PREDICT_MODEL_VERSION").unwrap_or(defaults.model_version),
            timeout: Duration::from_secs(
                std::env::var("PREDICT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(30),
            ),
            poll_interval: Duration::from_millis(
                std::env::var("PREDICT_POLL_INTERVAL_MS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(2000),
            ),
            max_polls: std::env::var("PREDICT_MAX_POLLS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_polls),
        }
    }
}

/// Client for the face-swap inference service.
pub struct PredictClient {
    http: Client,
    config: PredictConfig,
}

impl PredictClient {
    /// Create a new prediction client.
    pub fn new(config: PredictConfig) -> PredictResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(PredictError::Network)?;

        Ok(Self { http, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> PredictResult<Self> {
        Self::new(PredictConfig::from_env())
    }

    pub fn config(&self) -> &PredictConfig {
        &self.config
    }

    /// Create a prediction from a (source, target) input pair.
    pub async fn create(&self, request: &PredictionRequest) -> PredictResult<Prediction> {
        if self.config.api_token.is_empty() {
            return Err(PredictError::MissingToken);
        }

        let url = format!("{}/v1/predictions", self.config.base_url);
        debug!("Creating prediction at {}", url);

        let body = json!({
            "version": self.config.model_version,
            "input": {
                "source": request.source,
                "target": request.target,
            },
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.api_token)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(PredictError::RequestFailed(format!(
                "inference service returned {}: {}",
                status, text
            )));
        }

        let prediction: Prediction = response.json().await?;
        debug!(id = %prediction.id, status = %prediction.status, "Prediction created");
        Ok(prediction)
    }

    /// Fetch the current state of a prediction.
    pub async fn get(&self, id: &PredictionId) -> PredictResult<Prediction> {
        if self.config.api_token.is_empty() {
            return Err(PredictError::MissingToken);
        }

        let url = format!("{}/v1/predictions/{}", self.config.base_url, id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.config.api_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(PredictError::RequestFailed(format!(
                "inference service returned {}: {}",
                status, text
            )));
        }

        Ok(response.json().await?)
    }

    /// Poll a prediction until it reaches a terminal state.
    ///
    /// A failed poll request is a hard failure of the whole wait. The poll
    /// count is bounded so a wedged upstream job cannot hold a caller
    /// forever.
    pub async fn wait_for_terminal(&self, id: &PredictionId) -> PredictResult<Prediction> {
        let mut polls = 0u32;

        loop {
            let prediction = match self.get(id).await {
                Ok(p) => p,
                Err(e) => {
                    warn!(id = %id, "Status poll failed: {}", e);
                    return Err(PredictError::StatusPoll(e.to_string()));
                }
            };

            if prediction.is_terminal() {
                return Ok(prediction);
            }

            polls += 1;
            if polls >= self.config.max_polls {
                warn!(id = %id, polls, "Giving up on prediction poll");
                return Err(PredictError::PollTimeout { polls });
            }

            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booth_models::PredictionStatus;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String) -> PredictConfig {
        PredictConfig {
            base_url,
            api_token: "test-token".to_string(),
            poll_interval: Duration::from_millis(10),
            max_polls: 5,
            ..PredictConfig::default()
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = PredictConfig::default();
        assert_eq!(config.base_url, "https://api.replicate.com");
        assert_eq!(config.poll_interval, Duration::from_secs(2));
        assert_eq!(config.max_polls, 150);
    }

    #[tokio::test]
    async fn test_create_posts_version_and_input() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/predictions"))
            .and(body_partial_json(serde_json::json!({
                "input": {"source": "src", "target": "tgt"}
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": "p1",
                "status": "starting"
            })))
            .mount(&server)
            .await;

        let client = PredictClient::new(test_config(server.uri())).unwrap();
        let prediction = client
            .create(&PredictionRequest {
                source: "src".to_string(),
                target: "tgt".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(prediction.id.as_str(), "p1");
        // Transient upstream states fold to pending
        assert_eq!(prediction.status, PredictionStatus::Pending);
    }

    #[tokio::test]
    async fn test_create_without_token_fails_locally() {
        let mut config = test_config("http://localhost:9".to_string());
        config.api_token = String::new();
        let client = PredictClient::new(config).unwrap();

        let err = client
            .create(&PredictionRequest {
                source: "s".to_string(),
                target: "t".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PredictError::MissingToken));
    }

    #[tokio::test]
    async fn test_create_non_2xx_is_request_failed() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/predictions"))
            .respond_with(ResponseTemplate::new(422).set_body_string("bad input"))
            .mount(&server)
            .await;

        let client = PredictClient::new(test_config(server.uri())).unwrap();
        let err = client
            .create(&PredictionRequest {
                source: "s".to_string(),
                target: "t".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PredictError::RequestFailed(_)));
    }

    #[tokio::test]
    async fn test_wait_for_terminal_polls_until_succeeded() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/predictions/p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "p1",
                "status": "processing"
            })))
            .up_to_n_times(2)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/predictions/p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "p1",
                "status": "succeeded",
                "output": "https://example.com/out.gif"
            })))
            .mount(&server)
            .await;

        let client = PredictClient::new(test_config(server.uri())).unwrap();
        let prediction = client
            .wait_for_terminal(&PredictionId::from_string("p1"))
            .await
            .unwrap();

        assert_eq!(prediction.status, PredictionStatus::Succeeded);
        assert_eq!(prediction.output.as_deref(), Some("https://example.com/out.gif"));
    }

    #[tokio::test]
    async fn test_wait_for_terminal_bounded() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/predictions/stuck"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "stuck",
                "status": "processing"
            })))
            .mount(&server)
            .await;

        let client = PredictClient::new(test_config(server.uri())).unwrap();
        let err = client
            .wait_for_terminal(&PredictionId::from_string("stuck"))
            .await
            .unwrap_err();

        assert!(matches!(err, PredictError::PollTimeout { polls: 5 }));
    }

    #[tokio::test]
    async fn test_wait_for_terminal_poll_error_is_hard_failure() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/predictions/gone"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = PredictClient::new(test_config(server.uri())).unwrap();
        let err = client
            .wait_for_terminal(&PredictionId::from_string("gone"))
            .await
            .unwrap_err();

        assert!(matches!(err, PredictError::StatusPoll(_)));
    }
}
