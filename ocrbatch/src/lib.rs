//! Batch OCR for PDF documents.
//!
//! Input patterns are resolved to files, each file is sent through an
//! [`ocr::OcrBackend`], and the results are written as JSON: one file per
//! document plus a combined result with renumbered pages.

pub mod config;
pub mod error;
pub mod models;
pub mod ocr;
pub mod processing;
pub mod storage;
