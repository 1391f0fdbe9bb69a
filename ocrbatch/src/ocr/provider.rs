use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::config::{parse_provider_model, OcrConfig, KNOWN_OCR_PROVIDERS};
use crate::error::{OcrBatchError, Result};
use crate::models::DocumentResult;

use super::{MistralOcrClient, OcrBackend};

#[derive(Clone)]
enum OcrApiClient {
    Mistral(MistralOcrClient),
}

impl OcrApiClient {
    async fn process_document(&self, content: &[u8], name: &str) -> Result<DocumentResult> {
        match self {
            OcrApiClient::Mistral(c) => c.process_document(content, name).await,
        }
    }

    fn provider_name(&self) -> &str {
        match self {
            OcrApiClient::Mistral(c) => c.provider_name(),
        }
    }
}

/// The configured OCR backend, with a hard deadline on every document.
///
/// Construction fails on an unknown provider or missing credentials.
#[derive(Clone)]
pub struct OcrProvider {
    client: OcrApiClient,
    timeout_secs: u64,
}

impl OcrProvider {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let (provider, model) = parse_provider_model(&config.model);

        let client = match provider.to_lowercase().as_str() {
            "mistral" => {
                let client = MistralOcrClient::new(config)?;
                info!(model = %model, "Mistral OCR API backend initialized");
                OcrApiClient::Mistral(client)
            }
            other => {
                return Err(OcrBatchError::Config(format!(
                    "Unknown OCR provider '{other}' in OCR_MODEL (known: {})",
                    KNOWN_OCR_PROVIDERS.join(", ")
                )))
            }
        };

        Ok(Self {
            client,
            timeout_secs: config.timeout_secs,
        })
    }
}

#[async_trait]
impl OcrBackend for OcrProvider {
    async fn process_document(&self, content: &[u8], name: &str) -> Result<DocumentResult> {
        let timeout_duration = Duration::from_secs(self.timeout_secs);

        match tokio::time::timeout(timeout_duration, self.client.process_document(content, name))
            .await
        {
            Ok(inner_result) => inner_result,
            Err(_) => Err(OcrBatchError::Ocr(format!(
                "OCR of {name} timed out after {} seconds",
                self.timeout_secs
            ))),
        }
    }

    fn provider_name(&self) -> &str {
        self.client.provider_name()
    }
}
