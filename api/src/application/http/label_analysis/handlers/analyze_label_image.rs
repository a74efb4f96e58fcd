use axum::{
    Extension,
    extract::{Multipart, State},
};
use nutriscan_core::domain::label_analysis::{
    entities::LabelAnalysis,
    ports::LabelAnalysisService,
    value_objects::{AnalyzeLabelImageInput, LabelImage},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{
    http::{
        label_analysis::validators::validate_label_upload,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
    visitor_middleware::VisitorContext,
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeLabelResponse {
    pub data: LabelAnalysis,
}

#[utoipa::path(
    post,
    path = "/analyze",
    tag = "labels",
    summary = "Analyze a label photo",
    description = "Runs OCR on the uploaded `image` part, then asks the model for a health assessment",
    request_body(content_type = "multipart/form-data", description = "Form with an `image` file part"),
    responses(
        (status = 201, body = AnalyzeLabelResponse),
        (status = 400, description = "Missing, oversized or non-image upload"),
        (status = 422, description = "Text could not be extracted from the image")
    ),
)]
pub async fn analyze_label_image(
    State(state): State<AppState>,
    Extension(visitor): Extension<VisitorContext>,
    mut multipart: Multipart,
) -> Result<Response<AnalyzeLabelResponse>, ApiError> {
    let mut image: Option<LabelImage> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read multipart field: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let file_name = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read image: {}", e)))?;

        let content_type = validate_label_upload(content_type.as_deref(), data.len())
            .map_err(ApiError::BadRequest)?;

        image = Some(LabelImage {
            data,
            content_type,
            file_name,
        });
    }

    let image = image.ok_or_else(|| ApiError::BadRequest("Missing image field".to_string()))?;

    let analysis = state
        .service
        .analyze_label_image(AnalyzeLabelImageInput {
            visitor_id: visitor.visitor_id,
            image,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(AnalyzeLabelResponse { data: analysis }))
}
