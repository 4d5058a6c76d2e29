//! GIF gallery listing.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::StorageResult;

/// Lists the animated GIFs the kiosk offers for selection.
#[derive(Debug, Clone)]
pub struct GifGallery {
    dir: PathBuf,
}

impl GifGallery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolve a gallery filename to its path on disk.
    pub fn path_of(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// List `.gif` filenames, sorted, so the carousel order is stable.
    pub async fn list(&self) -> StorageResult<Vec<String>> {
        debug!("Listing gifs in {}", self.dir.display());

        let mut entries = tokio::fs::read_dir(&self.dir).await?;
        let mut gifs = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if name
                .rsplit_once('.')
                .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("gif"))
            {
                gifs.push(name.to_string());
            }
        }

        gifs.sort();
        Ok(gifs)
    }
}
