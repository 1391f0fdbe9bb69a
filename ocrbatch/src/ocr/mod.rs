//! OCR backends
//!
//! The pipeline only sees the [`OcrBackend`] trait: raw document bytes plus a
//! file name go in, a page-oriented [`DocumentResult`] comes out.
//!
//! # Architecture
//!
//! - `OcrBackend` trait defines the interface
//! - `MistralOcrClient` talks to the Mistral OCR API (upload, signed URL, OCR)
//! - `OcrProvider` picks the client from `OcrConfig::model` and bounds each call
//!   with `OcrConfig::timeout_secs`
//!
//! # Usage
//!
//! ```rust,ignore
//! let ocr = OcrProvider::new(&config.ocr)?;
//! let result = ocr.process_document(&pdf_bytes, "report.pdf").await?;
//! ```

mod mistral;
mod provider;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::DocumentResult;

pub use mistral::MistralOcrClient;
pub use provider::OcrProvider;

#[async_trait]
pub trait OcrBackend: Send + Sync {
    /// Run OCR over one document. Failures must come back as `Err`.
    async fn process_document(&self, content: &[u8], name: &str) -> Result<DocumentResult>;

    fn provider_name(&self) -> &str;
}
