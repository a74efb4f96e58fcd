use std::time::Instant;

use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};
use tracing::error;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        health::{entities::UsageStats, ports::HealthCheckRepository},
    },
    entity::{label_analyses, visitors},
};

#[derive(Debug, Clone)]
pub struct PostgresHealthCheckRepository {
    pub db: DatabaseConnection,
}

impl PostgresHealthCheckRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl HealthCheckRepository for PostgresHealthCheckRepository {
    async fn readiness(&self) -> Result<u64, CoreError> {
        let started = Instant::now();

        self.db.ping().await.map_err(|e| {
            error!("Database ping failed: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(started.elapsed().as_millis() as u64)
    }

    async fn usage_stats(&self, since: DateTime<Utc>) -> Result<UsageStats, CoreError> {
        let count_error = |e: sea_orm::DbErr| {
            error!("Failed to count usage: {}", e);
            CoreError::InternalServerError
        };

        let total_analyses = label_analyses::Entity::find()
            .count(&self.db)
            .await
            .map_err(count_error)?;
        let total_visitors = visitors::Entity::find()
            .count(&self.db)
            .await
            .map_err(count_error)?;
        let recent_analyses = label_analyses::Entity::find()
            .filter(label_analyses::Column::CreatedAt.gte(since.fixed_offset()))
            .count(&self.db)
            .await
            .map_err(count_error)?;

        Ok(UsageStats {
            total_analyses,
            total_visitors,
            recent_analyses,
        })
    }
}
