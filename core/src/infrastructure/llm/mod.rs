use reqwest::Client;
use tracing::info;

use crate::domain::{
    common::{LLMConfig, LLMProvider, entities::app_errors::CoreError},
    label_analysis::ports::LLMClient,
};

pub mod gemini_client;
pub mod ollama_client;

pub use gemini_client::GeminiLLMClient;
pub use ollama_client::OllamaLLMClient;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub temperature: f32,
    pub top_p: f32,
}

impl Default for Sampling {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            top_p: 0.9,
        }
    }
}

/// The configured model backend.
#[derive(Debug, Clone)]
pub enum AnyLLMClient {
    Ollama(OllamaLLMClient),
    Gemini(GeminiLLMClient),
}

impl AnyLLMClient {
    pub fn from_config(config: &LLMConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                CoreError::InternalServerError
            })?;

        let sampling = Sampling {
            temperature: config.temperature,
            top_p: config.top_p,
        };

        let llm_client = match config.provider {
            LLMProvider::Ollama => {
                info!(
                    base_url = %config.ollama_base_url,
                    model = %config.ollama_model,
                    "Using Ollama model"
                );
                AnyLLMClient::Ollama(OllamaLLMClient::new(
                    config.ollama_base_url.clone(),
                    config.ollama_model.clone(),
                    sampling,
                    client,
                ))
            }
            LLMProvider::Gemini => {
                if config.gemini_api_key.trim().is_empty() {
                    tracing::error!("Gemini provider selected without an API key");
                    return Err(CoreError::Invalid);
                }
                info!(model = %config.gemini_model, "Using Gemini model");
                AnyLLMClient::Gemini(GeminiLLMClient::new(
                    config.gemini_api_key.clone(),
                    config.gemini_model.clone(),
                    sampling,
                    client,
                ))
            }
        };

        Ok(llm_client)
    }
}

impl LLMClient for AnyLLMClient {
    async fn complete(&self, prompt: String) -> Result<String, CoreError> {
        match self {
            AnyLLMClient::Ollama(client) => client.complete(prompt).await,
            AnyLLMClient::Gemini(client) => client.complete(prompt).await,
        }
    }
}
