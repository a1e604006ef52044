// src/clients/inference.rs

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::Config;

/// Something that turns a prompt into generated text.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn infer(&self, prompt: &str) -> Result<String, InferenceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("could not reach the inference server: {0}")]
    Connection(String),
    #[error("inference server returned {0}: {1}")]
    Server(StatusCode, String),
    #[error("inference server sent an unreadable response: {0}")]
    Decode(String),
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Client for an Ollama-compatible `/api/generate` endpoint.
///
/// One non-streaming POST per call. No retries and no timeout beyond the
/// transport defaults.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    url: Url,
    model: String,
}

impl OllamaClient {
    pub fn new(url: Url, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            url,
            model: model.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.ollama_url.clone(), config.ollama_model.clone())
    }
}

#[async_trait]
impl InferenceClient for OllamaClient {
    #[tracing::instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn infer(&self, prompt: &str) -> Result<String, InferenceError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        let response = self
            .http
            .post(self.url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Inference request failed: {}", e);
                InferenceError::Connection(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(%status, "Inference server returned an error");
            return Err(InferenceError::Server(status, text));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::Decode(e.to_string()))?;

        tracing::debug!(response_len = parsed.response.len(), "Inference complete");
        Ok(parsed.response)
    }
}
