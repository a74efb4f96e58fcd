use axum::{Router, routing::get};
use utoipa::OpenApi;

use super::handlers::{
    health_check::{__path_health_check, health_check},
    liveness::{__path_liveness, liveness},
};
use crate::application::http::server::app_state::AppState;

#[derive(OpenApi)]
#[openapi(paths(health_check, liveness))]
pub struct HealthApiDoc;

pub fn health_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/health", state.args.server.root_path),
            get(health_check),
        )
        .route(
            &format!("{}/health/live", state.args.server.root_path),
            get(liveness),
        )
}
