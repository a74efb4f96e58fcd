use axum::http::StatusCode;

#[utoipa::path(
    get,
    path = "/live",
    tag = "health",
    summary = "Process liveness",
    responses(
        (status = 204, description = "The process is up")
    ),
)]
pub async fn liveness() -> StatusCode {
    StatusCode::NO_CONTENT
}
