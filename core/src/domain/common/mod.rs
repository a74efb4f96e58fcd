use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
#[cfg(test)]
pub(crate) mod fakes;
pub mod services;

#[derive(Clone, Debug)]
pub struct NutriScanConfig {
    pub database: DatabaseConfig,
    pub llm: LLMConfig,
    pub ocr: OcrConfig,
    pub object_storage: ObjectStorageConfig,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
}

impl DatabaseConfig {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.name
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LLMProvider {
    Ollama,
    Gemini,
}

#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub provider: LLMProvider,
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub temperature: f32,
    pub top_p: f32,
    pub gemini_api_key: String,
    pub gemini_model: String,
    /// Upper bound on a single completion; elapsed calls count as model failures.
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct OcrConfig {
    pub tesseract_path: String,
    pub oem: u8,
    pub psm: u8,
    /// Passed as `-c tessedit_char_whitelist=...` when set.
    pub char_whitelist: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ObjectStorageConfig {
    pub endpoint: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
    pub bucket: String,
    pub use_ssl: bool,
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, now.timestamp_subsec_nanos());

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}
