use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    analyze_label_image::{__path_analyze_label_image, analyze_label_image},
    analyze_label_text::{__path_analyze_label_text, analyze_label_text},
    get_analyses::{__path_get_analyses, get_analyses},
    get_analysis::{__path_get_analysis, get_analysis},
};
use super::validators::MAX_IMAGE_SIZE;
use crate::application::{
    http::server::app_state::AppState, visitor_middleware::visitor_middleware,
};

#[derive(OpenApi)]
#[openapi(paths(analyze_label_image, analyze_label_text, get_analyses, get_analysis))]
pub struct LabelAnalysisApiDoc;

pub fn label_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/labels/analyze", state.args.server.root_path),
            // Leave headroom over the image cap for multipart framing.
            post(analyze_label_image).layer(DefaultBodyLimit::max(MAX_IMAGE_SIZE + 64 * 1024)),
        )
        .route(
            &format!("{}/labels/analyze/text", state.args.server.root_path),
            post(analyze_label_text),
        )
        .route(
            &format!("{}/labels", state.args.server.root_path),
            get(get_analyses),
        )
        .route(
            &format!("{}/labels/{{analysis_id}}", state.args.server.root_path),
            get(get_analysis),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            visitor_middleware,
        ))
}
