use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, sea_query::Expr,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        visitor::{entities::Visitor, ports::VisitorRepository},
    },
    entity::visitors::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresVisitorRepository {
    pub db: DatabaseConnection,
}

impl PostgresVisitorRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl VisitorRepository for PostgresVisitorRepository {
    async fn get_by_session_key(&self, session_key: String) -> Result<Option<Visitor>, CoreError> {
        let visitor = Entity::find()
            .filter(Column::SessionKey.eq(session_key))
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get visitor: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(visitor.map(Visitor::from))
    }

    async fn create(&self, visitor: Visitor) -> Result<Visitor, CoreError> {
        let active_model = ActiveModel {
            id: Set(visitor.id),
            session_key: Set(visitor.session_key),
            ip_address: Set(visitor.ip_address),
            user_agent: Set(visitor.user_agent),
            total_analyses: Set(visitor.total_analyses),
            created_at: Set(visitor.created_at.fixed_offset()),
            last_activity: Set(visitor.last_activity.fixed_offset()),
        };

        let created = Entity::insert(active_model)
            .exec_with_returning(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to create visitor: {}", e);
                CoreError::InternalServerError
            })?;

        Ok(Visitor::from(created))
    }

    async fn touch(
        &self,
        visitor_id: Uuid,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<Visitor, CoreError> {
        let mut active_model = ActiveModel {
            id: Set(visitor_id),
            last_activity: Set(Utc::now().fixed_offset()),
            ..Default::default()
        };
        if ip_address.is_some() {
            active_model.ip_address = Set(ip_address);
        }
        if user_agent.is_some() {
            active_model.user_agent = Set(user_agent);
        }

        let updated = active_model.update(&self.db).await.map_err(|e| {
            error!("Failed to update visitor activity: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(Visitor::from(updated))
    }

    async fn record_analysis(&self, visitor_id: Uuid) -> Result<(), CoreError> {
        let result = Entity::update_many()
            .col_expr(
                Column::TotalAnalyses,
                Expr::col(Column::TotalAnalyses).add(1),
            )
            .col_expr(Column::LastActivity, Expr::value(Utc::now().fixed_offset()))
            .filter(Column::Id.eq(visitor_id))
            .exec(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to record visitor analysis: {}", e);
                CoreError::InternalServerError
            })?;

        if result.rows_affected == 0 {
            return Err(CoreError::NotFound);
        }

        Ok(())
    }
}
