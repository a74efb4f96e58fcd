use std::time::Duration;

use clap::{Args as ClapArgs, Parser, ValueEnum};
use nutriscan_core::domain::common::{
    DatabaseConfig, LLMConfig, LLMProvider, NutriScanConfig, ObjectStorageConfig, OcrConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "nutriscan", version, about = "Food label analysis API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub db: DatabaseArgs,

    #[command(flatten)]
    pub model: ModelArgs,

    #[command(flatten)]
    pub ocr: OcrArgs,

    #[command(flatten)]
    pub object_storage: ObjectStorageArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 3333)]
    pub port: u16,

    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:5173"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct DatabaseArgs {
    #[arg(long = "database-host", env = "DATABASE_HOST", default_value = "localhost")]
    pub host: String,

    #[arg(long = "database-port", env = "DATABASE_PORT", default_value_t = 5432)]
    pub port: u16,

    #[arg(long = "database-user", env = "DATABASE_USER", default_value = "postgres")]
    pub user: String,

    #[arg(long = "database-password", env = "DATABASE_PASSWORD", default_value = "postgres")]
    pub password: String,

    #[arg(long = "database-name", env = "DATABASE_NAME", default_value = "nutriscan")]
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModelProvider {
    Ollama,
    Gemini,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ModelArgs {
    #[arg(long = "model-provider", env = "MODEL_PROVIDER", value_enum, default_value_t = ModelProvider::Ollama)]
    pub provider: ModelProvider,

    #[arg(long = "ollama-base-url", env = "OLLAMA_BASE_URL", default_value = "http://localhost:11434")]
    pub ollama_base_url: String,

    #[arg(long = "ollama-model", env = "OLLAMA_MODEL", default_value = "llama3.2:latest")]
    pub ollama_model: String,

    #[arg(long = "model-temperature", env = "MODEL_TEMPERATURE", default_value_t = 0.3)]
    pub temperature: f32,

    #[arg(long = "model-top-p", env = "MODEL_TOP_P", default_value_t = 0.9)]
    pub top_p: f32,

    #[arg(long = "gemini-api-key", env = "GEMINI_API_KEY", default_value = "", hide_env_values = true)]
    pub gemini_api_key: String,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = "gemini-2.0-flash")]
    pub gemini_model: String,

    #[arg(long = "model-timeout-secs", env = "MODEL_TIMEOUT_SECS", default_value_t = 120)]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct OcrArgs {
    #[arg(long = "tesseract-path", env = "TESSERACT_PATH", default_value = "tesseract")]
    pub tesseract_path: String,

    #[arg(long = "tesseract-oem", env = "TESSERACT_OEM", default_value_t = 3)]
    pub oem: u8,

    #[arg(long = "tesseract-psm", env = "TESSERACT_PSM", default_value_t = 6)]
    pub psm: u8,

    /// Characters Tesseract may emit; unset keeps the engine default.
    #[arg(long = "tesseract-char-whitelist", env = "TESSERACT_CHAR_WHITELIST")]
    pub char_whitelist: Option<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ObjectStorageArgs {
    #[arg(long = "object-storage-endpoint", env = "OBJECT_STORAGE_ENDPOINT", default_value = "http://localhost:9000")]
    pub endpoint: String,

    #[arg(long = "object-storage-region", env = "OBJECT_STORAGE_REGION", default_value = "us-east-1")]
    pub region: String,

    #[arg(long = "object-storage-access-key", env = "OBJECT_STORAGE_ACCESS_KEY", default_value = "minioadmin")]
    pub access_key: String,

    #[arg(
        long = "object-storage-secret-key",
        env = "OBJECT_STORAGE_SECRET_KEY",
        default_value = "minioadmin",
        hide_env_values = true
    )]
    pub secret_key: String,

    #[arg(long = "object-storage-bucket", env = "OBJECT_STORAGE_BUCKET", default_value = "nutriscan")]
    pub bucket: String,

    #[arg(long = "object-storage-use-ssl", env = "OBJECT_STORAGE_USE_SSL", default_value_t = false)]
    pub use_ssl: bool,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

impl From<Args> for NutriScanConfig {
    fn from(args: Args) -> Self {
        Self {
            database: DatabaseConfig {
                host: args.db.host,
                port: args.db.port,
                username: args.db.user,
                password: args.db.password,
                name: args.db.name,
            },
            llm: LLMConfig {
                provider: match args.model.provider {
                    ModelProvider::Ollama => LLMProvider::Ollama,
                    ModelProvider::Gemini => LLMProvider::Gemini,
                },
                ollama_base_url: args.model.ollama_base_url,
                ollama_model: args.model.ollama_model,
                temperature: args.model.temperature,
                top_p: args.model.top_p,
                gemini_api_key: args.model.gemini_api_key,
                gemini_model: args.model.gemini_model,
                timeout: Duration::from_secs(args.model.timeout_secs),
            },
            ocr: OcrConfig {
                tesseract_path: args.ocr.tesseract_path,
                oem: args.ocr.oem,
                psm: args.ocr.psm,
                char_whitelist: args.ocr.char_whitelist,
            },
            object_storage: ObjectStorageConfig {
                endpoint: args.object_storage.endpoint,
                region: args.object_storage.region,
                access_key: args.object_storage.access_key,
                secret_key: args.object_storage.secret_key,
                bucket: args.object_storage.bucket,
                use_ssl: args.object_storage.use_ssl,
            },
        }
    }
}
