use axum::{Extension, extract::State};
use nutriscan_core::domain::conversation::{
    entities::Conversation,
    ports::ConversationService,
    value_objects::{GetConversationsFilter, GetConversationsInput},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::{
    http::{
        query_extractor::QueryParamsExtractor,
        server::{
            api_entities::{api_error::ApiError, response::Response},
            app_state::AppState,
        },
    },
    visitor_middleware::VisitorContext,
};

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetConversationsResponse {
    pub items: Vec<Conversation>,
    pub offset: i64,
    pub limit: i64,
    pub count: usize,
}

#[utoipa::path(
    get,
    path = "",
    tag = "conversations",
    summary = "List conversations",
    description = "Most recently active first. Supports `offset`, `limit` and `filter[analysis_id]`",
    responses(
        (status = 200, body = GetConversationsResponse)
    ),
)]
pub async fn get_conversations(
    State(state): State<AppState>,
    Extension(visitor): Extension<VisitorContext>,
    QueryParamsExtractor(query_params): QueryParamsExtractor,
) -> Result<Response<GetConversationsResponse>, ApiError> {
    let mut filter = GetConversationsFilter {
        offset: Some(query_params.pagination.offset as u32),
        limit: Some(query_params.pagination.limit as u32),
        ..Default::default()
    };

    if let Some(value) = query_params.filter.get("analysis_id") {
        let analysis_id = Uuid::parse_str(value)
            .map_err(|_| ApiError::BadRequest("Invalid analysis_id filter".to_string()))?;
        filter.analysis_id = Some(analysis_id);
    }

    let conversations = state
        .service
        .list_conversations(GetConversationsInput {
            visitor_id: visitor.visitor_id,
            filter,
        })
        .await
        .map_err(ApiError::from)?;

    let count = conversations.len();
    Ok(Response::OK(GetConversationsResponse {
        items: conversations,
        offset: query_params.pagination.offset,
        limit: query_params.pagination.limit,
        count,
    }))
}
