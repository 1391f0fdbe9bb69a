use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OcrBatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("OCR error: {0}")]
    Ocr(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("No PDF files provided for processing")]
    NoInput,

    #[error("All {0} file(s) failed to process")]
    AllFailed(usize),
}

pub type Result<T> = std::result::Result<T, OcrBatchError>;
