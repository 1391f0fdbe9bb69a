use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{parse_provider_model, OcrConfig};
use crate::error::{OcrBatchError, Result};
use crate::models::DocumentResult;

use super::OcrBackend;

const DEFAULT_BASE_URL: &str = "https://api.mistral.ai/v1";
const SIGNED_URL_EXPIRY_HOURS: u32 = 24;

#[derive(Clone, Debug)]
pub struct MistralOcrClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    max_attempts: u32,
}

#[derive(Debug, Deserialize)]
struct UploadedFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SignedUrl {
    url: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum OcrDocument {
    #[serde(rename = "document_url")]
    DocumentUrl { document_url: String },
}

#[derive(Debug, Serialize)]
struct OcrRequest {
    model: String,
    document: OcrDocument,
}

impl MistralOcrClient {
    pub fn new(config: &OcrConfig) -> Result<Self> {
        let api_key = config.require_api_key()?.to_string();

        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let (_, model) = parse_provider_model(&config.model);

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OcrBatchError::Ocr(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url,
            model: model.to_string(),
            max_attempts: config.max_retries.max(1),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn upload(&self, content: &[u8], name: &str) -> Result<String> {
        let uploaded: UploadedFile = self
            .execute("upload", || {
                let part = multipart::Part::bytes(content.to_vec()).file_name(name.to_string());
                let form = multipart::Form::new()
                    .text("purpose", "ocr")
                    .part("file", part);
                self.client
                    .post(format!("{}/files", self.base_url))
                    .multipart(form)
            })
            .await?;
        Ok(uploaded.id)
    }

    async fn signed_url(&self, file_id: &str) -> Result<String> {
        let signed: SignedUrl = self
            .execute("signed URL", || {
                self.client
                    .get(format!("{}/files/{file_id}/url", self.base_url))
                    .query(&[("expiry", SIGNED_URL_EXPIRY_HOURS)])
            })
            .await?;
        Ok(signed.url)
    }

    async fn ocr(&self, document_url: String) -> Result<DocumentResult> {
        let request = OcrRequest {
            model: self.model.clone(),
            document: OcrDocument::DocumentUrl { document_url },
        };
        self.execute("OCR", || {
            self.client
                .post(format!("{}/ocr", self.base_url))
                .json(&request)
        })
        .await
    }

    /// Send the request built by `build`, retrying rate limits, server errors and
    /// transport failures with exponential backoff.
    async fn execute<T, F>(&self, step: &str, build: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn() -> RequestBuilder,
    {
        let mut attempts = 0;

        loop {
            let response = build()
                .header("Authorization", format!("Bearer {}", self.api_key))
                .send()
                .await;

            match response {
                Ok(resp) => {
                    if resp.status().is_success() {
                        return resp.json::<T>().await.map_err(|e| {
                            OcrBatchError::Ocr(format!("Failed to parse {step} response: {e}"))
                        });
                    } else if resp.status().as_u16() == 429 || resp.status().is_server_error() {
                        attempts += 1;
                        if attempts >= self.max_attempts {
                            return Err(OcrBatchError::Ocr(format!(
                                "{step} request failed after {attempts} attempts: {}",
                                resp.status()
                            )));
                        }
                        debug!(step, status = %resp.status(), attempts, "Retrying OCR API request");
                        tokio::time::sleep(Self::backoff(attempts)).await;
                        continue;
                    } else {
                        let status = resp.status();
                        let body = resp.text().await.unwrap_or_default();
                        return Err(OcrBatchError::Ocr(format!(
                            "{step} request failed: {status} - {body}"
                        )));
                    }
                }
                Err(e) => {
                    attempts += 1;
                    if attempts >= self.max_attempts {
                        return Err(OcrBatchError::Ocr(format!(
                            "{step} request failed after {attempts} attempts: {e}"
                        )));
                    }
                    debug!(step, error = %e, attempts, "Retrying OCR API request");
                    tokio::time::sleep(Self::backoff(attempts)).await;
                }
            }
        }
    }

    fn backoff(attempts: u32) -> Duration {
        Duration::from_millis(100 * (2_u64.pow(attempts)))
    }
}

#[async_trait]
impl OcrBackend for MistralOcrClient {
    async fn process_document(&self, content: &[u8], name: &str) -> Result<DocumentResult> {
        let file_id = self.upload(content, name).await?;
        debug!(file = name, file_id = %file_id, "Uploaded document");

        let url = self.signed_url(&file_id).await?;
        self.ocr(url).await
    }

    fn provider_name(&self) -> &str {
        "Mistral AI OCR"
    }
}
