use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::Sampling;
use crate::domain::{common::entities::app_errors::CoreError, label_analysis::ports::LLMClient};

/// Client for a local Ollama runtime, using the non-streaming generate endpoint.
#[derive(Debug, Clone)]
pub struct OllamaLLMClient {
    base_url: String,
    model_name: String,
    sampling: Sampling,
    client: Client,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
    top_p: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

impl OllamaLLMClient {
    pub fn new(base_url: String, model_name: String, sampling: Sampling, client: Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model_name,
            sampling,
            client,
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }
}

impl LLMClient for OllamaLLMClient {
    async fn complete(&self, prompt: String) -> Result<String, CoreError> {
        let request = GenerateRequest {
            model: &self.model_name,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.sampling.temperature,
                top_p: self.sampling.top_p,
            },
        };

        debug!(model = %self.model_name, "Sending prompt to Ollama");

        let response = self
            .client
            .post(self.generate_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("Ollama request failed: {}", e);
                CoreError::ModelCallError(format!("Ollama request failed: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            error!("Ollama error: {} - {}", status, error_text);
            return Err(CoreError::ModelCallError(format!(
                "Ollama returned {}: {}",
                status, error_text
            )));
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            error!("Failed to decode Ollama response: {}", e);
            CoreError::ModelCallError(format!("Failed to decode Ollama response: {}", e))
        })?;

        Ok(body.response)
    }
}
