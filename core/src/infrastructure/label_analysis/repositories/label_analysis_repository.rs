use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        label_analysis::{
            entities::LabelAnalysis, ports::LabelAnalysisRepository,
            value_objects::GetLabelAnalysesFilter,
        },
    },
    entity::label_analyses::{ActiveModel, Column, Entity},
};

#[derive(Debug, Clone)]
pub struct PostgresLabelAnalysisRepository {
    pub db: DatabaseConnection,
}

impl PostgresLabelAnalysisRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl LabelAnalysisRepository for PostgresLabelAnalysisRepository {
    async fn create(&self, analysis: LabelAnalysis) -> Result<LabelAnalysis, CoreError> {
        let created = Entity::insert(ActiveModel {
            id: Set(analysis.id),
            visitor_id: Set(analysis.visitor_id),
            image_object_key: Set(analysis.image_object_key),
            extracted_text: Set(analysis.extracted_text),
            ingredients_text: Set(analysis.ingredients_text),
            nutrition_text: Set(analysis.nutrition_text),
            recommendation: Set(analysis.recommendation.as_str().to_string()),
            health_score: Set(analysis.health_score),
            analysis: Set(analysis.analysis),
            summary: Set(analysis.summary),
            raw_response: Set(analysis.raw_response),
            created_at: Set(analysis.created_at.fixed_offset()),
        })
        .exec_with_returning(&self.db)
        .await
        .map(LabelAnalysis::from)
        .map_err(|e| {
            error!("Failed to create label analysis: {}", e);
            CoreError::InternalServerError
        })?;

        Ok(created)
    }

    async fn get_by_id(&self, analysis_id: Uuid) -> Result<Option<LabelAnalysis>, CoreError> {
        let analysis = Entity::find_by_id(analysis_id)
            .one(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to get label analysis: {}", e);
                CoreError::InternalServerError
            })?
            .map(LabelAnalysis::from);

        Ok(analysis)
    }

    async fn list_by_visitor(
        &self,
        visitor_id: Uuid,
        filter: GetLabelAnalysesFilter,
    ) -> Result<Vec<LabelAnalysis>, CoreError> {
        let mut query = Entity::find().filter(Column::VisitorId.eq(visitor_id));

        if let Some(recommendation) = filter.recommendation {
            query = query.filter(Column::Recommendation.eq(recommendation.as_str()));
        }

        query = query
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        if let Some(offset) = filter.offset {
            query = query.offset(offset as u64);
        }

        if let Some(limit) = filter.limit {
            query = query.limit(limit as u64);
        }

        let analyses = query
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to list label analyses: {}", e);
                CoreError::InternalServerError
            })?
            .into_iter()
            .map(LabelAnalysis::from)
            .collect();

        Ok(analyses)
    }
}
