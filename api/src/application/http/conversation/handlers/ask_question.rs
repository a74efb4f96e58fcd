use axum::{
    Extension,
    extract::{Path, State},
};
use nutriscan_core::domain::conversation::{
    entities::ChatReply, ports::ConversationService, value_objects::AskQuestionInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::{
    http::{
        conversation::validators::AskQuestionRequest,
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

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AskQuestionResponse {
    pub data: ChatReply,
}

#[utoipa::path(
    post,
    path = "/{analysis_id}/chat",
    tag = "conversations",
    summary = "Ask a follow-up question about an analysis",
    description = "Starts a conversation when `conversation_id` is absent. A model outage still yields an answer",
    params(
        ("analysis_id" = Uuid, Path, description = "Analysis ID"),
    ),
    request_body = AskQuestionRequest,
    responses(
        (status = 200, body = AskQuestionResponse),
        (status = 404, description = "Unknown analysis or conversation")
    ),
)]
pub async fn ask_question(
    Path(analysis_id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(visitor): Extension<VisitorContext>,
    ValidateJson(payload): ValidateJson<AskQuestionRequest>,
) -> Result<Response<AskQuestionResponse>, ApiError> {
    let reply = state
        .service
        .ask_question(AskQuestionInput {
            visitor_id: visitor.visitor_id,
            analysis_id,
            conversation_id: payload.conversation_id,
            question: payload.question,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(AskQuestionResponse { data: reply }))
}
