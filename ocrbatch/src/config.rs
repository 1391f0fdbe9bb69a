use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::error::{OcrBatchError, Result};

pub const DEFAULT_OCR_MODEL: &str = "mistral/mistral-ocr-latest";
pub const DEFAULT_COMBINED_FILE: &str = "result.json";

pub(crate) fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

fn non_empty_env(var: &str) -> Option<String> {
    env::var(var).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub ocr: OcrConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OcrConfig {
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    /// Total attempts per API request, the first one included.
    pub max_retries: u32,
}

/// Where and how pipeline artifacts are written.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub combined_file: String,
    pub single_file_mode: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_OCR_MODEL.to_string(),
            api_key: None,
            base_url: None,
            timeout_secs: 120,
            max_retries: 3,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            combined_file: DEFAULT_COMBINED_FILE.to_string(),
            single_file_mode: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let output_defaults = OutputConfig::default();
        Self {
            ocr: OcrConfig {
                model: env::var("OCR_MODEL").unwrap_or_else(|_| DEFAULT_OCR_MODEL.to_string()),
                api_key: non_empty_env("MISTRAL_API_KEY"),
                base_url: non_empty_env("OCR_BASE_URL"),
                timeout_secs: parse_env_or("OCR_TIMEOUT", 120),
                max_retries: parse_env_or("OCR_MAX_RETRIES", 3),
            },
            output: OutputConfig {
                dir: non_empty_env("OCR_OUTPUT_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(output_defaults.dir),
                combined_file: non_empty_env("OCR_COMBINED_FILE")
                    .unwrap_or(output_defaults.combined_file),
                single_file_mode: parse_env_or("OCR_SINGLE_FILE", false),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }
}

impl OcrConfig {
    /// The configured API key, or a configuration error naming the variable to set.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            OcrBatchError::Config(
                "MISTRAL_API_KEY is not set. Set it in your environment or .env file".to_string(),
            )
        })
    }
}

/// OCR providers with a backend implementation.
pub const KNOWN_OCR_PROVIDERS: &[&str] = &["mistral"];

/// Parse a model name into (provider, model) tuple.
///
/// A bare model name without a provider prefix is attributed to Mistral.
pub fn parse_provider_model(model: &str) -> (&str, &str) {
    model.split_once('/').unwrap_or(("mistral", model))
}
