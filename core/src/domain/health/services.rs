use chrono::{Duration, Utc};
use tracing::warn;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    conversation::ports::ConversationRepository,
    health::{
        entities::{ComponentHealth, ComponentsHealth, HealthReport, UsageStats},
        ports::{HealthCheckRepository, HealthCheckService},
    },
    label_analysis::ports::{
        LLMClient, LabelAnalysisRepository, LabelImageStorage, TextExtractor,
    },
    visitor::ports::VisitorRepository,
};

pub const MODEL_PING_PROMPT: &str = "Hello, respond with 'OK' if you can hear me.";

impl<LA, CV, VS, HC, LLM, OCR, IS> HealthCheckService for Service<LA, CV, VS, HC, LLM, OCR, IS>
where
    LA: LabelAnalysisRepository,
    CV: ConversationRepository,
    VS: VisitorRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
    OCR: TextExtractor,
    IS: LabelImageStorage,
{
    async fn health_report(&self) -> Result<HealthReport, CoreError> {
        let (database, model, ocr) = tokio::join!(
            self.health_check_repository.readiness(),
            self.call_model(MODEL_PING_PROMPT.to_string()),
            self.text_extractor.engine_version(),
        );

        let database = match database {
            Ok(elapsed) => ComponentHealth::up(format!("Database reachable in {elapsed}ms")),
            Err(e) => ComponentHealth::down(format!("Database error: {e}")),
        };
        let model = match model {
            Ok(_) => ComponentHealth::up("Model is responding"),
            Err(e) => ComponentHealth::down(e.to_string()),
        };
        let ocr = match ocr {
            Ok(version) => ComponentHealth::up(version),
            Err(e) => ComponentHealth::down(e.to_string()),
        };

        let stats = if database.status {
            self.health_check_repository
                .usage_stats(Utc::now() - Duration::hours(24))
                .await
                .unwrap_or_else(|e| {
                    warn!("Failed to collect usage stats: {}", e);
                    UsageStats::default()
                })
        } else {
            UsageStats::default()
        };

        Ok(HealthReport::new(
            ComponentsHealth {
                database,
                model,
                ocr,
            },
            stats,
        ))
    }
}
