use std::sync::OnceLock;

use chrono::{DateTime, Utc};

use crate::error::OcrBatchError;

use super::DocumentResult;

/// Result of pushing one input file through the OCR backend.
#[derive(Debug)]
pub enum ProcessingOutcome {
    Succeeded(DocumentResult),
    Failed(OcrBatchError),
}

/// One input file after processing. Never mutated once built.
#[derive(Debug)]
pub struct ProcessedDocument {
    pub source_path: String,
    pub processed_at: DateTime<Utc>,
    pub outcome: ProcessingOutcome,
}

fn empty_result() -> &'static DocumentResult {
    static EMPTY: OnceLock<DocumentResult> = OnceLock::new();
    EMPTY.get_or_init(DocumentResult::default)
}

impl ProcessedDocument {
    pub fn succeeded(source_path: impl Into<String>, result: DocumentResult) -> Self {
        Self {
            source_path: source_path.into(),
            processed_at: Utc::now(),
            outcome: ProcessingOutcome::Succeeded(result),
        }
    }

    pub fn failed(source_path: impl Into<String>, error: OcrBatchError) -> Self {
        Self {
            source_path: source_path.into(),
            processed_at: Utc::now(),
            outcome: ProcessingOutcome::Failed(error),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, ProcessingOutcome::Succeeded(_))
    }

    /// The OCR result, or the empty `{ pages: [] }` placeholder for a failed document.
    pub fn result(&self) -> &DocumentResult {
        match &self.outcome {
            ProcessingOutcome::Succeeded(result) => result,
            ProcessingOutcome::Failed(_) => empty_result(),
        }
    }

    pub fn error(&self) -> Option<&OcrBatchError> {
        match &self.outcome {
            ProcessingOutcome::Succeeded(_) => None,
            ProcessingOutcome::Failed(e) => Some(e),
        }
    }

    /// Overrides the processing timestamp, normally taken when work on the file began.
    pub fn started_at(mut self, processed_at: DateTime<Utc>) -> Self {
        self.processed_at = processed_at;
        self
    }
}
