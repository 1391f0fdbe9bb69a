#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::json;

use ocrbatch::error::{OcrBatchError, Result};
use ocrbatch::models::{DocumentResult, Page};
use ocrbatch::ocr::OcrBackend;

/// OCR backend double keyed by file name.
///
/// Each document gets one page unless configured otherwise; every page index
/// starts at zero, as a real backend would report it.
#[derive(Default)]
pub struct FakeOcrBackend {
    page_counts: HashMap<String, usize>,
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeOcrBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pages(mut self, name: &str, pages: usize) -> Self {
        self.page_counts.insert(name.to_string(), pages);
        self
    }

    pub fn failing(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl OcrBackend for FakeOcrBackend {
    async fn process_document(&self, _content: &[u8], name: &str) -> Result<DocumentResult> {
        self.calls.lock().unwrap().push(name.to_string());

        if self.failing.contains(name) {
            return Err(OcrBatchError::Ocr(format!(
                "OCR processing failed for file {name}"
            )));
        }

        let count = self.page_counts.get(name).copied().unwrap_or(1);
        let pages = (0..count)
            .map(|i| Page::with_text(i as u64, format!("{name} page {i}")))
            .collect();
        let metadata = json!({ "source": name })
            .as_object()
            .cloned()
            .unwrap();

        Ok(DocumentResult::new(pages).with_metadata(metadata))
    }

    fn provider_name(&self) -> &str {
        "fake"
    }
}

/// Write a minimal PDF stand-in and return its path as a string.
pub fn write_pdf(dir: &Path, name: &str) -> String {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    fs::write(&path, b"%PDF-1.4\n%%EOF\n").expect("Failed to write PDF fixture");
    path.to_string_lossy().into_owned()
}

/// Read and parse a JSON artifact written by the pipeline.
pub fn read_result(path: &Path) -> DocumentResult {
    let raw = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
    serde_json::from_str(&raw).unwrap_or_else(|e| panic!("Invalid JSON in {}: {e}", path.display()))
}

/// Sorted file names directly under `dir`, or nothing if it does not exist.
pub fn list_dir(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
