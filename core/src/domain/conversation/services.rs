use tracing::{error, info};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    conversation::{
        entities::{
            ChatExchange, ChatReply, ChatTurn, Conversation, ConversationTranscript,
            RecordedExchange,
        },
        ports::{ConversationRepository, ConversationService},
        value_objects::{AskQuestionInput, GetConversationInput, GetConversationsInput},
    },
    health::ports::HealthCheckRepository,
    label_analysis::{
        parser::{ChatResponse, parse_chat_response},
        ports::{LLMClient, LabelAnalysisRepository, LabelImageStorage, TextExtractor},
        prompts::build_chat_prompt,
        services::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE},
    },
    visitor::ports::VisitorRepository,
};

/// Number of most recent turns shown to the model.
pub const MAX_HISTORY_TURNS: usize = 10;

/// Answer stored when the model cannot be reached.
pub const MODEL_UNAVAILABLE_ANSWER: &str =
    "I'm experiencing technical difficulties. Please try again later.";

/// The last `limit` turns, in their original order.
pub fn trim_history(turns: &[ChatTurn], limit: usize) -> &[ChatTurn] {
    &turns[turns.len().saturating_sub(limit)..]
}

impl<LA, CV, VS, HC, LLM, OCR, IS> ConversationService for Service<LA, CV, VS, HC, LLM, OCR, IS>
where
    LA: LabelAnalysisRepository,
    CV: ConversationRepository,
    VS: VisitorRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
    OCR: TextExtractor,
    IS: LabelImageStorage,
{
    async fn ask_question(&self, input: AskQuestionInput) -> Result<ChatReply, CoreError> {
        let question = input.question.trim();
        if question.is_empty() {
            return Err(CoreError::Invalid);
        }

        let analysis = self
            .label_analysis_repository
            .get_by_id(input.analysis_id)
            .await?
            .filter(|analysis| analysis.visitor_id == input.visitor_id)
            .ok_or(CoreError::NotFound)?;

        let (mut conversation, is_new_conversation) = match input.conversation_id {
            Some(conversation_id) => {
                let conversation = self
                    .conversation_repository
                    .get_by_id(conversation_id)
                    .await?
                    .filter(|c| c.visitor_id == input.visitor_id)
                    .ok_or(CoreError::NotFound)?;

                if conversation.analysis_id != analysis.id {
                    return Err(CoreError::Invalid);
                }

                (conversation, false)
            }
            None => (Conversation::new(input.visitor_id, analysis.id), true),
        };

        let turns = if is_new_conversation {
            Vec::new()
        } else {
            self.conversation_repository
                .list_turns(conversation.id)
                .await?
        };
        let history = trim_history(&turns, MAX_HISTORY_TURNS);

        // The opening question carries the label photo it is about.
        let image_object_key = turns
            .is_empty()
            .then(|| analysis.image_object_key.clone())
            .flatten();
        let user_turn = ChatTurn::user(conversation.id, question.to_string(), image_object_key);

        let prompt = build_chat_prompt(&analysis, history, question);
        let ChatResponse { title, body } = match self.call_model(prompt).await {
            Ok(raw) => parse_chat_response(&raw),
            Err(e) => {
                error!("Model call failed for conversation {}: {}", conversation.id, e);
                ChatResponse {
                    title: None,
                    body: MODEL_UNAVAILABLE_ANSWER.to_string(),
                }
            }
        };

        // Only a conversation that still looks untitled proposes one; the
        // repository makes the final call against the stored row.
        let proposed_title = title
            .map(|title| title.trim().to_string())
            .filter(|title| !title.is_empty() && conversation.has_default_title());
        conversation.touch();

        let assistant_turn = ChatTurn::assistant(conversation.id, body);

        let RecordedExchange {
            conversation,
            title_updated,
        } = self
            .conversation_repository
            .record_exchange(ChatExchange {
                conversation,
                is_new_conversation,
                proposed_title,
                user_turn: user_turn.clone(),
                assistant_turn: assistant_turn.clone(),
            })
            .await?;

        if title_updated {
            info!(
                "Conversation {} titled \"{}\"",
                conversation.id, conversation.title
            );
        }

        Ok(ChatReply {
            conversation,
            user_turn,
            assistant_turn,
            title_updated,
        })
    }

    async fn get_conversation(
        &self,
        input: GetConversationInput,
    ) -> Result<ConversationTranscript, CoreError> {
        let conversation = self
            .conversation_repository
            .get_by_id(input.conversation_id)
            .await?
            .filter(|c| c.visitor_id == input.visitor_id)
            .ok_or(CoreError::NotFound)?;

        let turns = self
            .conversation_repository
            .list_turns(conversation.id)
            .await?;

        Ok(ConversationTranscript {
            conversation,
            turns,
        })
    }

    async fn list_conversations(
        &self,
        input: GetConversationsInput,
    ) -> Result<Vec<Conversation>, CoreError> {
        let mut filter = input.filter;
        filter.limit = Some(filter.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE));

        self.conversation_repository
            .list_by_visitor(input.visitor_id, filter)
            .await
    }
}
