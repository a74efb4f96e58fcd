//! In-memory adapters for exercising the services end to end in unit tests.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use bytes::Bytes;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    conversation::{
        entities::{ChatExchange, ChatTurn, Conversation, RecordedExchange},
        ports::ConversationRepository,
        value_objects::GetConversationsFilter,
    },
    health::{entities::UsageStats, ports::HealthCheckRepository},
    label_analysis::{
        entities::LabelAnalysis,
        ports::{LLMClient, LabelAnalysisRepository, LabelImageStorage, TextExtractor},
        value_objects::GetLabelAnalysesFilter,
    },
    visitor::{
        entities::Visitor,
        ports::{VisitorRepository, VisitorService},
        value_objects::ResolveVisitorInput,
    },
};

fn page<T: Clone>(items: impl Iterator<Item = T>, offset: Option<u32>, limit: Option<u32>) -> Vec<T> {
    items
        .skip(offset.unwrap_or(0) as usize)
        .take(limit.map_or(usize::MAX, |l| l as usize))
        .collect()
}

#[derive(Clone, Default)]
pub struct InMemoryLabelAnalyses {
    records: Arc<Mutex<Vec<LabelAnalysis>>>,
}

impl InMemoryLabelAnalyses {
    pub fn all(&self) -> Vec<LabelAnalysis> {
        self.records.lock().unwrap().clone()
    }

    pub fn insert(&self, analysis: LabelAnalysis) {
        self.records.lock().unwrap().push(analysis);
    }
}

impl LabelAnalysisRepository for InMemoryLabelAnalyses {
    async fn create(&self, analysis: LabelAnalysis) -> Result<LabelAnalysis, CoreError> {
        self.insert(analysis.clone());
        Ok(analysis)
    }

    async fn get_by_id(&self, analysis_id: Uuid) -> Result<Option<LabelAnalysis>, CoreError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == analysis_id)
            .cloned())
    }

    async fn list_by_visitor(
        &self,
        visitor_id: Uuid,
        filter: GetLabelAnalysesFilter,
    ) -> Result<Vec<LabelAnalysis>, CoreError> {
        let records = self.records.lock().unwrap();
        let matching = records.iter().rev().filter(|a| {
            a.visitor_id == visitor_id
                && filter
                    .recommendation
                    .is_none_or(|recommendation| a.recommendation == recommendation)
        });
        Ok(page(matching.cloned(), filter.offset, filter.limit))
    }
}

#[derive(Clone, Default)]
pub struct InMemoryConversations {
    conversations: Arc<Mutex<Vec<Conversation>>>,
    turns: Arc<Mutex<Vec<ChatTurn>>>,
}

impl InMemoryConversations {
    pub fn conversations(&self) -> Vec<Conversation> {
        self.conversations.lock().unwrap().clone()
    }

    pub fn turns(&self) -> Vec<ChatTurn> {
        self.turns.lock().unwrap().clone()
    }

    pub fn insert_turn(&self, turn: ChatTurn) {
        self.turns.lock().unwrap().push(turn);
    }
}

impl ConversationRepository for InMemoryConversations {
    async fn get_by_id(&self, conversation_id: Uuid) -> Result<Option<Conversation>, CoreError> {
        Ok(self
            .conversations
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == conversation_id)
            .cloned())
    }

    async fn list_turns(&self, conversation_id: Uuid) -> Result<Vec<ChatTurn>, CoreError> {
        Ok(self
            .turns
            .lock()
            .unwrap()
            .iter()
            .filter(|t| t.conversation_id == conversation_id)
            .cloned()
            .collect())
    }

    async fn list_by_visitor(
        &self,
        visitor_id: Uuid,
        filter: GetConversationsFilter,
    ) -> Result<Vec<Conversation>, CoreError> {
        let conversations = self.conversations.lock().unwrap();
        let matching = conversations.iter().rev().filter(|c| {
            c.visitor_id == visitor_id
                && filter
                    .analysis_id
                    .is_none_or(|analysis_id| c.analysis_id == analysis_id)
        });
        Ok(page(matching.cloned(), filter.offset, filter.limit))
    }

    async fn record_exchange(
        &self,
        exchange: ChatExchange,
    ) -> Result<RecordedExchange, CoreError> {
        let ChatExchange {
            conversation,
            is_new_conversation,
            proposed_title,
            user_turn,
            assistant_turn,
        } = exchange;

        let mut conversations = self.conversations.lock().unwrap();
        let stored = if is_new_conversation {
            conversations.push(conversation);
            conversations.last_mut().ok_or(CoreError::InternalServerError)?
        } else {
            let stored = conversations
                .iter_mut()
                .find(|c| c.id == conversation.id)
                .ok_or(CoreError::NotFound)?;
            stored.updated_at = conversation.updated_at;
            stored
        };

        let title_updated = proposed_title
            .as_deref()
            .is_some_and(|title| stored.adopt_title(title));
        let conversation = stored.clone();
        drop(conversations);

        let mut turns = self.turns.lock().unwrap();
        turns.push(user_turn);
        turns.push(assistant_turn);

        Ok(RecordedExchange {
            conversation,
            title_updated,
        })
    }
}

#[derive(Clone, Default)]
pub struct InMemoryVisitors {
    visitors: Arc<Mutex<Vec<Visitor>>>,
}

impl InMemoryVisitors {
    pub fn get(&self, visitor_id: Uuid) -> Visitor {
        self.visitors
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.id == visitor_id)
            .cloned()
            .expect("visitor exists")
    }

    pub fn len(&self) -> usize {
        self.visitors.lock().unwrap().len()
    }
}

impl VisitorRepository for InMemoryVisitors {
    async fn get_by_session_key(&self, session_key: String) -> Result<Option<Visitor>, CoreError> {
        Ok(self
            .visitors
            .lock()
            .unwrap()
            .iter()
            .find(|v| v.session_key == session_key)
            .cloned())
    }

    async fn create(&self, visitor: Visitor) -> Result<Visitor, CoreError> {
        self.visitors.lock().unwrap().push(visitor.clone());
        Ok(visitor)
    }

    async fn touch(
        &self,
        visitor_id: Uuid,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<Visitor, CoreError> {
        let mut visitors = self.visitors.lock().unwrap();
        let visitor = visitors
            .iter_mut()
            .find(|v| v.id == visitor_id)
            .ok_or(CoreError::NotFound)?;
        visitor.ip_address = ip_address.or(visitor.ip_address.take());
        visitor.user_agent = user_agent.or(visitor.user_agent.take());
        visitor.last_activity = Utc::now();
        Ok(visitor.clone())
    }

    async fn record_analysis(&self, visitor_id: Uuid) -> Result<(), CoreError> {
        let mut visitors = self.visitors.lock().unwrap();
        let visitor = visitors
            .iter_mut()
            .find(|v| v.id == visitor_id)
            .ok_or(CoreError::NotFound)?;
        visitor.total_analyses += 1;
        visitor.last_activity = Utc::now();
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct StaticHealthCheck {
    pub database_down: bool,
}

impl HealthCheckRepository for StaticHealthCheck {
    async fn readiness(&self) -> Result<u64, CoreError> {
        if self.database_down {
            return Err(CoreError::InternalServerError);
        }
        Ok(1)
    }

    async fn usage_stats(&self, _since: DateTime<Utc>) -> Result<UsageStats, CoreError> {
        Ok(UsageStats {
            total_analyses: 3,
            total_visitors: 2,
            recent_analyses: 1,
        })
    }
}

enum Scripted {
    Answer(Result<String, CoreError>),
    Delayed(String, Duration),
}

/// Model double answering from a queue and recording every prompt it sees.
#[derive(Clone, Default)]
pub struct ScriptedModel {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedModel {
    pub fn push_ok(&self, answer: &str) {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Answer(Ok(answer.to_string())));
    }

    pub fn push_err(&self, error: CoreError) {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Answer(Err(error)));
    }

    pub fn push_delayed(&self, answer: &str, delay: Duration) {
        self.script
            .lock()
            .unwrap()
            .push_back(Scripted::Delayed(answer.to_string(), delay));
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl LLMClient for ScriptedModel {
    async fn complete(&self, prompt: String) -> Result<String, CoreError> {
        self.prompts.lock().unwrap().push(prompt);
        let next = self.script.lock().unwrap().pop_front();

        match next {
            Some(Scripted::Answer(answer)) => answer,
            Some(Scripted::Delayed(answer, delay)) => {
                tokio::time::sleep(delay).await;
                Ok(answer)
            }
            None => Err(CoreError::ModelCallError("no scripted answer".to_string())),
        }
    }
}

#[derive(Clone, Default)]
pub struct ScriptedOcr {
    result: Arc<Mutex<Option<Result<String, CoreError>>>>,
}

impl ScriptedOcr {
    pub fn succeed_with(&self, text: &str) {
        *self.result.lock().unwrap() = Some(Ok(text.to_string()));
    }

    pub fn fail_with(&self, message: &str) {
        *self.result.lock().unwrap() = Some(Err(CoreError::ExtractionError(message.to_string())));
    }
}

impl TextExtractor for ScriptedOcr {
    async fn extract_text(&self, _image: Bytes) -> Result<String, CoreError> {
        self.result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| Err(CoreError::ExtractionError("no scripted text".to_string())))
    }

    async fn engine_version(&self) -> Result<String, CoreError> {
        Ok("tesseract 5.3.0".to_string())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryImages {
    objects: Arc<Mutex<Vec<(String, String)>>>,
}

impl InMemoryImages {
    pub fn keys(&self) -> Vec<String> {
        self.objects
            .lock()
            .unwrap()
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }
}

impl LabelImageStorage for InMemoryImages {
    async fn put_object(
        &self,
        object_key: String,
        _payload: Bytes,
        content_type: String,
    ) -> Result<(), CoreError> {
        self.objects.lock().unwrap().push((object_key, content_type));
        Ok(())
    }
}

pub type TestService = Service<
    InMemoryLabelAnalyses,
    InMemoryConversations,
    InMemoryVisitors,
    StaticHealthCheck,
    ScriptedModel,
    ScriptedOcr,
    InMemoryImages,
>;

/// A service wired to in-memory adapters, with handles kept for assertions.
pub struct Fixture {
    pub service: TestService,
    pub analyses: InMemoryLabelAnalyses,
    pub conversations: InMemoryConversations,
    pub visitors: InMemoryVisitors,
    pub model: ScriptedModel,
    pub ocr: ScriptedOcr,
    pub images: InMemoryImages,
}

impl Fixture {
    pub fn new() -> Self {
        Self::build(StaticHealthCheck::default(), Duration::from_secs(5))
    }

    pub fn with_model_timeout(timeout: Duration) -> Self {
        Self::build(StaticHealthCheck::default(), timeout)
    }

    pub fn with_database_down() -> Self {
        Self::build(
            StaticHealthCheck {
                database_down: true,
            },
            Duration::from_secs(5),
        )
    }

    fn build(health: StaticHealthCheck, model_timeout: Duration) -> Self {
        let analyses = InMemoryLabelAnalyses::default();
        let conversations = InMemoryConversations::default();
        let visitors = InMemoryVisitors::default();
        let model = ScriptedModel::default();
        let ocr = ScriptedOcr::default();
        let images = InMemoryImages::default();

        let service = Service::new(
            analyses.clone(),
            conversations.clone(),
            visitors.clone(),
            health,
            model.clone(),
            ocr.clone(),
            images.clone(),
            model_timeout,
        );

        Self {
            service,
            analyses,
            conversations,
            visitors,
            model,
            ocr,
            images,
        }
    }

    /// Registers a fresh visitor through the service.
    pub async fn visitor(&self) -> Visitor {
        self.service
            .resolve_visitor(ResolveVisitorInput {
                session_id: Uuid::new_v4().to_string(),
                ip_address: Some("127.0.0.1".to_string()),
                user_agent: Some("test-agent".to_string()),
            })
            .await
            .unwrap()
    }
}
