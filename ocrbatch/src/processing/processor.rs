use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};

use crate::error::Result;
use crate::models::{DocumentResult, ProcessedDocument};
use crate::ocr::OcrBackend;
use crate::storage::FileStore;

/// Runs documents through the OCR backend one at a time.
///
/// A failing document is recorded as failed and never stops the batch.
pub struct DocumentProcessor {
    ocr: Arc<dyn OcrBackend>,
    files: Arc<dyn FileStore>,
}

impl DocumentProcessor {
    pub fn new(ocr: Arc<dyn OcrBackend>, files: Arc<dyn FileStore>) -> Self {
        Self { ocr, files }
    }

    pub async fn process_all(&self, paths: &[String]) -> Vec<ProcessedDocument> {
        let mut processed = Vec::with_capacity(paths.len());

        for path in paths {
            info!("Processing {}...", path);
            processed.push(self.process_one(path).await);
        }

        processed
    }

    pub async fn process_one(&self, path: &str) -> ProcessedDocument {
        let started = Utc::now();
        let document = match self.extract(path).await {
            Ok(result) => {
                info!(
                    path = %path,
                    pages = result.page_count(),
                    provider = self.ocr.provider_name(),
                    "Document processed"
                );
                ProcessedDocument::succeeded(path, result)
            }
            Err(e) => {
                error!("Error processing file {}: {}", path, e);
                ProcessedDocument::failed(path, e)
            }
        };
        document.started_at(started)
    }

    async fn extract(&self, path: &str) -> Result<DocumentResult> {
        let file_path = Path::new(path);
        let content = self.files.read(file_path).await?;
        let name = self.files.base_name(file_path);
        self.ocr.process_document(&content, &name).await
    }
}
