use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;

/// Raw file operations the pipeline depends on.
///
/// Failing operations must surface as errors, never as silent no-ops.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn read(&self, path: &Path) -> Result<Vec<u8>>;
    async fn write(&self, path: &Path, data: &[u8]) -> Result<()>;
    async fn exists(&self, path: &Path) -> bool;
    /// Create `path` and any missing parents.
    async fn ensure_dir(&self, path: &Path) -> Result<()>;

    /// Final path component, or the whole path when it has none.
    fn base_name(&self, path: &Path) -> String {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned())
    }
}
