use axum::{
    Router, middleware,
    routing::{get, post},
};
use utoipa::OpenApi;

use super::handlers::{
    ask_question::{__path_ask_question, ask_question},
    get_conversation::{__path_get_conversation, get_conversation},
    get_conversations::{__path_get_conversations, get_conversations},
};
use crate::application::{
    http::server::app_state::AppState, visitor_middleware::visitor_middleware,
};

#[derive(OpenApi)]
#[openapi(paths(ask_question))]
pub struct ChatApiDoc;

#[derive(OpenApi)]
#[openapi(paths(get_conversations, get_conversation))]
pub struct ConversationApiDoc;

pub fn conversation_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!(
                "{}/labels/{{analysis_id}}/chat",
                state.args.server.root_path
            ),
            post(ask_question),
        )
        .route(
            &format!("{}/conversations", state.args.server.root_path),
            get(get_conversations),
        )
        .route(
            &format!(
                "{}/conversations/{{conversation_id}}",
                state.args.server.root_path
            ),
            get(get_conversation),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            visitor_middleware,
        ))
}
