use axum::{Extension, extract::State};
use nutriscan_core::domain::label_analysis::{
    ports::LabelAnalysisService, value_objects::AnalyzeLabelTextInput,
};

use crate::application::{
    http::{
        label_analysis::{
            handlers::analyze_label_image::AnalyzeLabelResponse,
            validators::AnalyzeLabelTextRequest,
        },
        server::{
            api_entities::{
                api_error::{ApiError, ValidateJson},
                response::Response,
            },
            app_state::AppState,
        },
    },
    visitor_middleware::VisitorContext,
};

#[utoipa::path(
    post,
    path = "/analyze/text",
    tag = "labels",
    summary = "Analyze pasted label text",
    description = "Skips OCR and analyzes label text supplied by the client",
    request_body = AnalyzeLabelTextRequest,
    responses(
        (status = 201, body = AnalyzeLabelResponse)
    ),
)]
pub async fn analyze_label_text(
    State(state): State<AppState>,
    Extension(visitor): Extension<VisitorContext>,
    ValidateJson(payload): ValidateJson<AnalyzeLabelTextRequest>,
) -> Result<Response<AnalyzeLabelResponse>, ApiError> {
    let analysis = state
        .service
        .analyze_label_text(AnalyzeLabelTextInput {
            visitor_id: visitor.visitor_id,
            text: payload.text,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(AnalyzeLabelResponse { data: analysis }))
}
