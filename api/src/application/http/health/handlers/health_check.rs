use axum::extract::State;
use nutriscan_core::domain::health::{entities::HealthReport, ports::HealthCheckService};

use crate::application::http::server::{
    api_entities::{api_error::ApiError, response::Response},
    app_state::AppState,
};

#[utoipa::path(
    get,
    path = "",
    tag = "health",
    summary = "Check database, model and OCR availability",
    description = "Always answers 200; a failing component is reported through `status` and `components`",
    responses(
        (status = 200, body = HealthReport)
    ),
)]
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Response<HealthReport>, ApiError> {
    let report = state
        .service
        .health_report()
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(report))
}
