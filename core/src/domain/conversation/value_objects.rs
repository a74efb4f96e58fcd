use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AskQuestionInput {
    pub visitor_id: Uuid,
    pub analysis_id: Uuid,
    pub conversation_id: Option<Uuid>,
    pub question: String,
}

#[derive(Debug, Clone)]
pub struct GetConversationInput {
    pub visitor_id: Uuid,
    pub conversation_id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct GetConversationsFilter {
    pub analysis_id: Option<Uuid>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct GetConversationsInput {
    pub visitor_id: Uuid,
    pub filter: GetConversationsFilter,
}
