use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::config::OutputConfig;
use crate::error::{OcrBatchError, Result};
use crate::models::ProcessedDocument;
use crate::ocr::OcrBackend;
use crate::storage::FileStore;

use super::{combine_results, DocumentProcessor, ResultWriter};

/// Stages of a single pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Validating,
    Processing,
    Aggregating,
    Writing,
    Done,
    Aborted,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Validating => write!(f, "validating"),
            Self::Processing => write!(f, "processing"),
            Self::Aggregating => write!(f, "aggregating"),
            Self::Writing => write!(f, "writing"),
            Self::Done => write!(f, "done"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub output_dir: PathBuf,
    pub combined_file_name: String,
    /// Only process the first input file.
    pub single_file_mode: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self::from(&OutputConfig::default())
    }
}

impl From<&OutputConfig> for RunOptions {
    fn from(config: &OutputConfig) -> Self {
        Self {
            output_dir: config.dir.clone(),
            combined_file_name: config.combined_file.clone(),
            single_file_mode: config.single_file_mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedDocument {
    pub source_path: String,
    pub reason: String,
}

/// What a successful run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub succeeded: usize,
    pub failures: Vec<FailedDocument>,
    pub individual_outputs: Vec<PathBuf>,
    pub combined_output: Option<PathBuf>,
}

/// End-to-end batch: OCR every file, then write per-document results and,
/// when more than one document succeeded, a combined result.
///
/// The run aborts before writing anything when there is no input or when every
/// document failed. Individual failures are reported in the [`RunSummary`].
pub struct ProcessingPipeline {
    processor: DocumentProcessor,
    writer: ResultWriter,
}

impl ProcessingPipeline {
    pub fn new(ocr: Arc<dyn OcrBackend>, files: Arc<dyn FileStore>) -> Self {
        Self {
            processor: DocumentProcessor::new(ocr, files.clone()),
            writer: ResultWriter::new(files),
        }
    }

    pub async fn run(&self, files: &[String], options: &RunOptions) -> Result<RunSummary> {
        let mut stage = PipelineStage::Idle;

        transition(&mut stage, PipelineStage::Validating);
        if files.is_empty() {
            transition(&mut stage, PipelineStage::Aborted);
            return Err(OcrBatchError::NoInput);
        }

        let to_process = if options.single_file_mode {
            &files[..1]
        } else {
            files
        };

        transition(&mut stage, PipelineStage::Processing);
        let processed = self.processor.process_all(to_process).await;
        let processed_count = processed.len();

        let (succeeded, failed): (Vec<ProcessedDocument>, Vec<ProcessedDocument>) =
            processed.into_iter().partition(ProcessedDocument::is_success);
        let failures: Vec<FailedDocument> = failed.iter().map(failure_of).collect();

        if succeeded.is_empty() {
            transition(&mut stage, PipelineStage::Aborted);
            error!(failed = failures.len(), "All files failed to process");
            return Err(OcrBatchError::AllFailed(failures.len()));
        }

        let combined = if succeeded.len() > 1 {
            transition(&mut stage, PipelineStage::Aggregating);
            Some(combine_results(
                succeeded.iter().map(|doc| doc.result().clone()).collect(),
            ))
        } else {
            None
        };

        transition(&mut stage, PipelineStage::Writing);
        let mut individual_outputs = Vec::with_capacity(succeeded.len());
        for document in &succeeded {
            individual_outputs.push(
                self.writer
                    .write_individual(document, &options.output_dir)
                    .await?,
            );
        }

        let combined_output = match &combined {
            Some(result) => Some(
                self.writer
                    .write_combined(result, &options.combined_file_name, &options.output_dir)
                    .await?,
            ),
            None => None,
        };

        transition(&mut stage, PipelineStage::Done);
        info!(
            succeeded = succeeded.len(),
            failed = failures.len(),
            "All files processed successfully!"
        );

        Ok(RunSummary {
            processed: processed_count,
            succeeded: succeeded.len(),
            failures,
            individual_outputs,
            combined_output,
        })
    }
}

fn transition(stage: &mut PipelineStage, next: PipelineStage) {
    debug!(from = %stage, to = %next, "Pipeline stage change");
    *stage = next;
}

fn failure_of(document: &ProcessedDocument) -> FailedDocument {
    FailedDocument {
        source_path: document.source_path.clone(),
        reason: document
            .error()
            .map(ToString::to_string)
            .unwrap_or_default(),
    }
}
