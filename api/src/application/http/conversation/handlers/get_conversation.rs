use axum::{
    Extension,
    extract::{Path, State},
};
use nutriscan_core::domain::conversation::{
    entities::ConversationTranscript, ports::ConversationService,
    value_objects::GetConversationInput,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::{
    http::server::{
        api_entities::{api_error::ApiError, response::Response},
        app_state::AppState,
    },
    visitor_middleware::VisitorContext,
};

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GetConversationResponse {
    pub data: ConversationTranscript,
}

#[utoipa::path(
    get,
    path = "/{conversation_id}",
    tag = "conversations",
    summary = "Get a conversation with all its turns",
    params(
        ("conversation_id" = Uuid, Path, description = "Conversation ID"),
    ),
    responses(
        (status = 200, body = GetConversationResponse)
    ),
)]
pub async fn get_conversation(
    Path(conversation_id): Path<Uuid>,
    State(state): State<AppState>,
    Extension(visitor): Extension<VisitorContext>,
) -> Result<Response<GetConversationResponse>, ApiError> {
    let transcript = state
        .service
        .get_conversation(GetConversationInput {
            visitor_id: visitor.visitor_id,
            conversation_id,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetConversationResponse { data: transcript }))
}
