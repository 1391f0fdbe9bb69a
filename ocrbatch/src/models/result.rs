use serde::{Deserialize, Serialize};

/// Free-form document metadata. Values are arbitrary JSON.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// One page of OCR output.
///
/// `index` is the page position within the owning result. Fields the backend
/// returns beyond `index` and `text` (markdown, images, dimensions, ...) are
/// carried through untouched in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Page {
    pub index: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Page {
    pub fn new(index: u64) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }

    pub fn with_text(index: u64, text: impl Into<String>) -> Self {
        Self {
            index,
            text: Some(text.into()),
            extra: serde_json::Map::new(),
        }
    }
}

/// Page-oriented OCR output for one document, or the combination of several.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DocumentResult {
    #[serde(default)]
    pub pages: Vec<Page>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl DocumentResult {
    pub fn new(pages: Vec<Page>) -> Self {
        Self {
            pages,
            ..Default::default()
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
