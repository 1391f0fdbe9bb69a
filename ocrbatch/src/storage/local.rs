use std::path::Path;

use async_trait::async_trait;

use crate::error::{OcrBatchError, Result};

use super::FileStore;

/// [`FileStore`] backed by the local filesystem through `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileStore;

impl LocalFileStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        tokio::fs::read(path)
            .await
            .map_err(|source| OcrBatchError::Read {
                path: path.to_path_buf(),
                source,
            })
    }

    async fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        tokio::fs::write(path, data)
            .await
            .map_err(|source| OcrBatchError::Write {
                path: path.to_path_buf(),
                source,
            })
    }

    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|source| OcrBatchError::CreateDir {
                path: path.to_path_buf(),
                source,
            })
    }
}
