//! Visitcard persistence.
//!
//! The inference service's output URLs are temporary, so a shareable
//! result is downloaded and kept under a local media root together with a
//! JSON metadata record keyed by visitcard id.

use std::path::{Path, PathBuf};

use chrono::Utc;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use booth_models::{Visitcard, VisitcardId};

use crate::error::{StorageError, StorageResult};

/// Stores and retrieves shareable results.
pub struct VisitcardStore {
    http: Client,
    root: PathBuf,
}

impl VisitcardStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            http: Client::new(),
            root: root.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the stored GIF for a record.
    pub fn gif_path(&self, card: &Visitcard) -> PathBuf {
        self.root.join(&card.file_name)
    }

    fn record_path(&self, id: &VisitcardId) -> PathBuf {
        self.root.join(format!("{}.json", id))
    }

    /// Download a generated GIF and persist it with its metadata.
    pub async fn save_from_url(
        &self,
        gif_url: &str,
        metadata: serde_json::Value,
    ) -> StorageResult<Visitcard> {
        Url::parse(gif_url).map_err(|e| StorageError::InvalidUrl(format!("{gif_url}: {e}")))?;

        debug!("Fetching result GIF from {}", gif_url);
        let response = self.http.get(gif_url).send().await?;
        if !response.status().is_success() {
            return Err(StorageError::DownloadFailed(format!(
                "{} returned {}",
                gif_url,
                response.status()
            )));
        }
        let bytes = response.bytes().await?;

        let id = VisitcardId::new();
        let card = Visitcard {
            file_name: format!("gif-{}.gif", id),
            id,
            original_url: gif_url.to_string(),
            file_size: bytes.len() as u64,
            created_at: Utc::now(),
            metadata,
        };

        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(self.gif_path(&card), &bytes).await?;
        tokio::fs::write(
            self.record_path(&card.id),
            serde_json::to_vec_pretty(&card)?,
        )
        .await?;

        info!(id = %card.id, size = card.file_size, "Visitcard stored");
        Ok(card)
    }

    /// Look up a stored record by id.
    pub async fn fetch(&self, id: &VisitcardId) -> StorageResult<Visitcard> {
        let path = self.record_path(id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(id.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_save_and_fetch_roundtrip() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/out.gif"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(b"GIF89a-data".to_vec()))
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let store = VisitcardStore::new(tmp.path());

        let url = format!("{}/out.gif", server.uri());
        let card = store
            .save_from_url(&url, serde_json::json!({"gif": "dance.gif"}))
            .await
            .unwrap();

        assert_eq!(card.original_url, url);
        assert_eq!(card.file_size, 11);
        assert!(store.gif_path(&card).exists());

        let fetched = store.fetch(&card.id).await.unwrap();
        assert_eq!(fetched.id, card.id);
        assert_eq!(fetched.metadata["gif"], "dance.gif");
    }

    #[tokio::test]
    async fn test_save_rejects_invalid_url() {
        let tmp = tempfile::tempdir().unwrap();
        let store = VisitcardStore::new(tmp.path());

        let err = store
            .save_from_url("not a url", serde_json::Value::Null)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_save_surfaces_upstream_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gone.gif"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let tmp = tempfile::tempdir().unwrap();
        let store = VisitcardStore::new(tmp.path());

        let err = store
            .save_from_url(&format!("{}/gone.gif", server.uri()), serde_json::Value::Null)
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::DownloadFailed(_)));
    }

    #[tokio::test]
    async fn test_fetch_unknown_id_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let store = VisitcardStore::new(tmp.path());

        let err = store.fetch(&VisitcardId::new()).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }
}
