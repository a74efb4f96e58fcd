use axum::{
    Extension,
    extract::{Path, State},
};
use nutriscan_core::domain::label_analysis::{
    ports::LabelAnalysisService, value_objects::GetLabelAnalysisInput,
};
use uuid::Uuid;

use crate::application::{
    http::{
        label_analysis::handlers::analyze_label_image::AnalyzeLabelResponse,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
    visitor_middleware::VisitorContext,
};

#[utoipa::path(
    get,
    path = "/{analysis_id}",
    tag = "labels",
    summary = "Get one label analysis",
    params(
        ("analysis_id" = Uuid, Path, description = "Analysis ID"),
    ),
    responses(
        (status = 200, body = AnalyzeLabelResponse),
        (status = 404, description = "Unknown analysis or owned by another visitor")
    ),
)]
pub async fn get_analysis(
    Path(analysis_id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(visitor): Extension<VisitorContext>,
) -> Result<Response<AnalyzeLabelResponse>, ApiError> {
    let analysis = state
        .service
        .get_analysis(GetLabelAnalysisInput {
            visitor_id: visitor.visitor_id,
            analysis_id,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AnalyzeLabelResponse { data: analysis }))
}
