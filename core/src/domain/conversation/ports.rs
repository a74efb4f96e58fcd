use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    conversation::{
        entities::{
            ChatExchange, ChatReply, ChatTurn, Conversation, ConversationTranscript,
            RecordedExchange,
        },
        value_objects::{
            AskQuestionInput, GetConversationInput, GetConversationsFilter,
            GetConversationsInput,
        },
    },
};

/// Repository trait for conversations and their turns
#[cfg_attr(test, mockall::automock)]
pub trait ConversationRepository: Send + Sync {
    fn get_by_id(
        &self,
        conversation_id: Uuid,
    ) -> impl Future<Output = Result<Option<Conversation>, CoreError>> + Send;

    /// All turns of a conversation, oldest first.
    fn list_turns(
        &self,
        conversation_id: Uuid,
    ) -> impl Future<Output = Result<Vec<ChatTurn>, CoreError>> + Send;

    fn list_by_visitor(
        &self,
        visitor_id: Uuid,
        filter: GetConversationsFilter,
    ) -> impl Future<Output = Result<Vec<Conversation>, CoreError>> + Send;

    /// Stores the conversation row, the user turn and the assistant turn in
    /// one transaction.
    ///
    /// The proposed title is written only over the default title, checked
    /// against the stored row, so concurrent exchanges title a conversation
    /// at most once.
    fn record_exchange(
        &self,
        exchange: ChatExchange,
    ) -> impl Future<Output = Result<RecordedExchange, CoreError>> + Send;
}

/// Service trait for follow-up chat about an analysis
#[cfg_attr(test, mockall::automock)]
pub trait ConversationService: Send + Sync {
    fn ask_question(
        &self,
        input: AskQuestionInput,
    ) -> impl Future<Output = Result<ChatReply, CoreError>> + Send;

    fn get_conversation(
        &self,
        input: GetConversationInput,
    ) -> impl Future<Output = Result<ConversationTranscript, CoreError>> + Send;

    fn list_conversations(
        &self,
        input: GetConversationsInput,
    ) -> impl Future<Output = Result<Vec<Conversation>, CoreError>> + Send;
}
