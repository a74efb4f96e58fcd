use crate::{
    domain::label_analysis::entities::{LabelAnalysis, Recommendation},
    entity::label_analyses,
};

impl From<&label_analyses::Model> for LabelAnalysis {
    fn from(model: &label_analyses::Model) -> Self {
        Self {
            id: model.id,
            visitor_id: model.visitor_id,
            image_object_key: model.image_object_key.clone(),
            extracted_text: model.extracted_text.clone(),
            ingredients_text: model.ingredients_text.clone(),
            nutrition_text: model.nutrition_text.clone(),
            recommendation: Recommendation::from(model.recommendation.as_str()),
            health_score: model.health_score,
            analysis: model.analysis.clone(),
            summary: model.summary.clone(),
            raw_response: model.raw_response.clone(),
            created_at: model.created_at.to_utc(),
        }
    }
}

impl From<label_analyses::Model> for LabelAnalysis {
    fn from(model: label_analyses::Model) -> Self {
        Self::from(&model)
    }
}
