use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::generate_timestamp;

pub const DEFAULT_CONVERSATION_TITLE: &str = "New Conversation";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

impl ChatRole {
    pub fn as_str(&self) -> &str {
        match self {
            ChatRole::User => "user",
            ChatRole::Assistant => "assistant",
        }
    }
}

impl From<&str> for ChatRole {
    fn from(s: &str) -> Self {
        match s {
            "assistant" => ChatRole::Assistant,
            _ => ChatRole::User,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatTurn {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub role: ChatRole,
    pub content: String,
    pub image_object_key: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ChatTurn {
    fn new(
        conversation_id: Uuid,
        role: ChatRole,
        content: String,
        image_object_key: Option<String>,
    ) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            conversation_id,
            role,
            content,
            image_object_key,
            created_at: now,
        }
    }

    pub fn user(conversation_id: Uuid, content: String, image_object_key: Option<String>) -> Self {
        Self::new(conversation_id, ChatRole::User, content, image_object_key)
    }

    pub fn assistant(conversation_id: Uuid, content: String) -> Self {
        Self::new(conversation_id, ChatRole::Assistant, content, None)
    }
}

/// A chat thread about one label analysis.
///
/// The analysis is referenced, not owned: several conversations may point
/// at the same analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Conversation {
    pub id: Uuid,
    pub visitor_id: Uuid,
    pub analysis_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new(visitor_id: Uuid, analysis_id: Uuid) -> Self {
        let (now, timestamp) = generate_timestamp();

        Self {
            id: Uuid::new_v7(timestamp),
            visitor_id,
            analysis_id,
            title: DEFAULT_CONVERSATION_TITLE.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_default_title(&self) -> bool {
        self.title == DEFAULT_CONVERSATION_TITLE
    }

    /// Takes `title` if the conversation still carries the default one.
    ///
    /// Returns whether the title changed. Once renamed, a conversation keeps
    /// its title for good.
    pub fn adopt_title(&mut self, title: &str) -> bool {
        let title = title.trim();
        if !self.has_default_title() || title.is_empty() {
            return false;
        }

        self.title = title.to_string();
        true
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// One question and its answer, written to storage as a unit.
///
/// `proposed_title` is applied only if the stored conversation still has the
/// default title when the exchange is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatExchange {
    pub conversation: Conversation,
    pub is_new_conversation: bool,
    pub proposed_title: Option<String>,
    pub user_turn: ChatTurn,
    pub assistant_turn: ChatTurn,
}

/// Stored state of a conversation after an exchange was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedExchange {
    pub conversation: Conversation,
    pub title_updated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatReply {
    pub conversation: Conversation,
    pub user_turn: ChatTurn,
    pub assistant_turn: ChatTurn,
    pub title_updated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConversationTranscript {
    pub conversation: Conversation,
    pub turns: Vec<ChatTurn>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_conversation_has_default_title() {
        let conversation = Conversation::new(Uuid::new_v4(), Uuid::new_v4());

        assert_eq!(conversation.title, DEFAULT_CONVERSATION_TITLE);
        assert!(conversation.has_default_title());
    }

    #[test]
    fn title_is_adopted_only_once() {
        let mut conversation = Conversation::new(Uuid::new_v4(), Uuid::new_v4());

        assert!(conversation.adopt_title(" Low Sodium Snack "));
        assert_eq!(conversation.title, "Low Sodium Snack");

        assert!(!conversation.adopt_title("Something Else"));
        assert_eq!(conversation.title, "Low Sodium Snack");
    }

    #[test]
    fn blank_title_is_ignored() {
        let mut conversation = Conversation::new(Uuid::new_v4(), Uuid::new_v4());

        assert!(!conversation.adopt_title("   "));
        assert!(conversation.has_default_title());
    }

    #[test]
    fn chat_role_round_trips_through_str() {
        assert_eq!(ChatRole::from(ChatRole::User.as_str()), ChatRole::User);
        assert_eq!(
            ChatRole::from(ChatRole::Assistant.as_str()),
            ChatRole::Assistant
        );
    }
}
