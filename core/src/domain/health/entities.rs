use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ComponentHealth {
    pub status: bool,
    pub message: String,
}

impl ComponentHealth {
    pub fn up(message: impl Into<String>) -> Self {
        Self {
            status: true,
            message: message.into(),
        }
    }

    pub fn down(message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ComponentsHealth {
    pub database: ComponentHealth,
    pub model: ComponentHealth,
    pub ocr: ComponentHealth,
}

impl ComponentsHealth {
    pub fn all_up(&self) -> bool {
        self.database.status && self.model.status && self.ocr.status
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UsageStats {
    pub total_analyses: u64,
    pub total_visitors: u64,
    /// Analyses created during the last 24 hours.
    pub recent_analyses: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub components: ComponentsHealth,
    pub stats: UsageStats,
}

impl HealthReport {
    pub fn new(components: ComponentsHealth, stats: UsageStats) -> Self {
        let status = if components.all_up() {
            HealthStatus::Healthy
        } else {
            HealthStatus::Degraded
        };

        Self {
            status,
            timestamp: Utc::now(),
            components,
            stats,
        }
    }
}
