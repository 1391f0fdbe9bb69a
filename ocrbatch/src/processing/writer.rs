use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::error::Result;
use crate::models::{DocumentResult, ProcessedDocument};
use crate::storage::FileStore;

use super::strip_document_extension;

const INDIVIDUAL_PREFIX: &str = "ocr_";

/// Output file name for one document: `report.pdf` becomes `ocr_report.json`.
///
/// Only a trailing `.pdf` (any case) is removed; other dots stay.
pub fn individual_file_name(base_name: &str) -> String {
    format!(
        "{INDIVIDUAL_PREFIX}{}.json",
        strip_document_extension(base_name)
    )
}

/// Writes OCR results as pretty-printed JSON.
pub struct ResultWriter {
    files: Arc<dyn FileStore>,
}

impl ResultWriter {
    pub fn new(files: Arc<dyn FileStore>) -> Self {
        Self { files }
    }

    pub async fn write_individual(
        &self,
        document: &ProcessedDocument,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        let base_name = self.files.base_name(Path::new(&document.source_path));
        let output_path = output_dir.join(individual_file_name(&base_name));

        self.write_json(document.result(), &output_path, output_dir)
            .await?;
        info!("Individual result saved to {}", output_path.display());
        Ok(output_path)
    }

    pub async fn write_combined(
        &self,
        result: &DocumentResult,
        file_name: &str,
        output_dir: &Path,
    ) -> Result<PathBuf> {
        let output_path = output_dir.join(file_name);

        self.write_json(result, &output_path, output_dir).await?;
        info!("Combined result saved to {}", output_path.display());
        Ok(output_path)
    }

    async fn write_json(
        &self,
        result: &DocumentResult,
        output_path: &Path,
        output_dir: &Path,
    ) -> Result<()> {
        self.files.ensure_dir(output_dir).await?;
        let json = serde_json::to_string_pretty(result)?;
        self.files.write(output_path, json.as_bytes()).await
    }
}
