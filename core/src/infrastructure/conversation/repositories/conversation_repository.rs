use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait, sea_query::Expr,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        conversation::{
            entities::{
                ChatExchange, ChatTurn, Conversation, DEFAULT_CONVERSATION_TITLE,
                RecordedExchange,
            },
            ports::ConversationRepository,
            value_objects::GetConversationsFilter,
        },
    },
    entity::{
        chat_turns::{
            ActiveModel as TurnActiveModel, Column as TurnColumn, Entity as TurnEntity,
        },
        conversations::{ActiveModel, Column, Entity},
    },
};

fn db_error(context: &str, e: sea_orm::DbErr) -> CoreError {
    error!("{}: {}", context, e);
    CoreError::InternalServerError
}

#[derive(Debug, Clone)]
pub struct PostgresConversationRepository {
    pub db: DatabaseConnection,
}

impl PostgresConversationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ConversationRepository for PostgresConversationRepository {
    async fn get_by_id(&self, conversation_id: Uuid) -> Result<Option<Conversation>, CoreError> {
        let conversation = Entity::find_by_id(conversation_id)
            .one(&self.db)
            .await
            .map_err(|e| db_error("Failed to get conversation", e))?;

        Ok(conversation.map(Conversation::from))
    }

    async fn list_turns(&self, conversation_id: Uuid) -> Result<Vec<ChatTurn>, CoreError> {
        let turns = TurnEntity::find()
            .filter(TurnColumn::ConversationId.eq(conversation_id))
            .order_by_asc(TurnColumn::CreatedAt)
            .order_by_asc(TurnColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to list chat turns", e))?;

        Ok(turns.into_iter().map(ChatTurn::from).collect())
    }

    async fn list_by_visitor(
        &self,
        visitor_id: Uuid,
        filter: GetConversationsFilter,
    ) -> Result<Vec<Conversation>, CoreError> {
        let mut query = Entity::find().filter(Column::VisitorId.eq(visitor_id));

        if let Some(analysis_id) = filter.analysis_id {
            query = query.filter(Column::AnalysisId.eq(analysis_id));
        }

        query = query
            .order_by_desc(Column::UpdatedAt)
            .order_by_desc(Column::Id);

        if let Some(offset) = filter.offset {
            query = query.offset(offset as u64);
        }

        if let Some(limit) = filter.limit {
            query = query.limit(limit as u64);
        }

        let conversations = query
            .all(&self.db)
            .await
            .map_err(|e| db_error("Failed to list conversations", e))?;

        Ok(conversations.into_iter().map(Conversation::from).collect())
    }

    async fn record_exchange(
        &self,
        exchange: ChatExchange,
    ) -> Result<RecordedExchange, CoreError> {
        let ChatExchange {
            mut conversation,
            is_new_conversation,
            proposed_title,
            user_turn,
            assistant_turn,
        } = exchange;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| db_error("Failed to open transaction", e))?;

        let title_updated = if is_new_conversation {
            let title_updated = proposed_title
                .as_deref()
                .is_some_and(|title| conversation.adopt_title(title));

            Entity::insert(ActiveModel {
                id: Set(conversation.id),
                visitor_id: Set(conversation.visitor_id),
                analysis_id: Set(conversation.analysis_id),
                title: Set(conversation.title.clone()),
                created_at: Set(conversation.created_at.fixed_offset()),
                updated_at: Set(conversation.updated_at.fixed_offset()),
            })
            .exec(&txn)
            .await
            .map_err(|e| db_error("Failed to create conversation", e))?;

            title_updated
        } else {
            // Conditional on the stored title: a concurrent exchange that
            // titled the row first leaves nothing to update here.
            let title_updated = match proposed_title {
                Some(title) => {
                    Entity::update_many()
                        .col_expr(Column::Title, Expr::value(title))
                        .filter(Column::Id.eq(conversation.id))
                        .filter(Column::Title.eq(DEFAULT_CONVERSATION_TITLE))
                        .exec(&txn)
                        .await
                        .map_err(|e| db_error("Failed to title conversation", e))?
                        .rows_affected
                        == 1
                }
                None => false,
            };

            Entity::update_many()
                .col_expr(
                    Column::UpdatedAt,
                    Expr::value(conversation.updated_at.fixed_offset()),
                )
                .filter(Column::Id.eq(conversation.id))
                .exec(&txn)
                .await
                .map_err(|e| db_error("Failed to touch conversation", e))?;

            conversation = Entity::find_by_id(conversation.id)
                .one(&txn)
                .await
                .map_err(|e| db_error("Failed to reload conversation", e))?
                .map(Conversation::from)
                .ok_or(CoreError::NotFound)?;

            title_updated
        };

        TurnEntity::insert_many([
            TurnActiveModel::from(user_turn),
            TurnActiveModel::from(assistant_turn),
        ])
        .exec(&txn)
        .await
        .map_err(|e| db_error("Failed to store chat turns", e))?;

        txn.commit()
            .await
            .map_err(|e| db_error("Failed to commit chat exchange", e))?;

        Ok(RecordedExchange {
            conversation,
            title_updated,
        })
    }
}
