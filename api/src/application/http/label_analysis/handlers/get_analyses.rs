use axum::{Extension, extract::State};
use nutriscan_core::domain::label_analysis::{
    entities::{LabelAnalysis, Recommendation},
    ports::LabelAnalysisService,
    value_objects::{GetLabelAnalysesFilter, GetLabelAnalysesInput},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    http::{
        query_extractor::QueryParamsExtractor,
        query_params::QueryParams,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
    visitor_middleware::VisitorContext,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetAnalysesResponse {
    pub items: Vec<LabelAnalysis>,
    pub offset: i64,
    pub limit: i64,
    pub count: usize,
}

pub fn analyses_filter(query_params: &QueryParams) -> Result<GetLabelAnalysesFilter, ApiError> {
    let mut filter = GetLabelAnalysesFilter {
        offset: Some(query_params.pagination.offset as u32),
        limit: Some(query_params.pagination.limit as u32),
        ..Default::default()
    };

    if let Some(value) = query_params.filter.get("recommendation") {
        let recommendation = match value.to_uppercase().as_str() {
            "EAT" => Recommendation::Eat,
            "AVOID" => Recommendation::Avoid,
            "MODERATE" => Recommendation::Moderate,
            "ERROR" => Recommendation::Error,
            other => {
                return Err(ApiError::BadRequest(format!(
                    "Unknown recommendation filter: {}",
                    other
                )));
            }
        };
        filter.recommendation = Some(recommendation);
    }

    Ok(filter)
}

#[utoipa::path(
    get,
    path = "",
    tag = "labels",
    summary = "List label analyses",
    description = "Newest first. Supports `offset`, `limit` and `filter[recommendation]=EAT|AVOID|MODERATE|ERROR`",
    responses(
        (status = 200, body = GetAnalysesResponse)
    ),
)]
pub async fn get_analyses(
    State(state): State<AppState>,
    Extension(visitor): Extension<VisitorContext>,
    QueryParamsExtractor(query_params): QueryParamsExtractor,
) -> Result<Response<GetAnalysesResponse>, ApiError> {
    let filter = analyses_filter(&query_params)?;

    let analyses = state
        .service
        .list_analyses(GetLabelAnalysesInput {
            visitor_id: visitor.visitor_id,
            filter,
        })
        .await
        .map_err(ApiError::from)?;

    let count = analyses.len();
    Ok(Response::OK(GetAnalysesResponse {
        items: analyses,
        offset: query_params.pagination.offset,
        limit: query_params.pagination.limit,
        count,
    }))
}
