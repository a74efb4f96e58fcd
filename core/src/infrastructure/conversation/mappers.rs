use crate::{
    domain::conversation::entities::{ChatRole, ChatTurn, Conversation},
    entity::{chat_turns, conversations},
};

impl From<&conversations::Model> for Conversation {
    fn from(model: &conversations::Model) -> Self {
        Self {
            id: model.id,
            visitor_id: model.visitor_id,
            analysis_id: model.analysis_id,
            title: model.title.clone(),
            created_at: model.created_at.to_utc(),
            updated_at: model.updated_at.to_utc(),
        }
    }
}

impl From<conversations::Model> for Conversation {
    fn from(model: conversations::Model) -> Self {
        Self::from(&model)
    }
}

impl From<&chat_turns::Model> for ChatTurn {
    fn from(model: &chat_turns::Model) -> Self {
        Self {
            id: model.id,
            conversation_id: model.conversation_id,
            role: ChatRole::from(model.role.as_str()),
            content: model.content.clone(),
            image_object_key: model.image_object_key.clone(),
            created_at: model.created_at.to_utc(),
        }
    }
}

impl From<chat_turns::Model> for ChatTurn {
    fn from(model: chat_turns::Model) -> Self {
        Self::from(&model)
    }
}

impl From<ChatTurn> for chat_turns::ActiveModel {
    fn from(turn: ChatTurn) -> Self {
        use sea_orm::ActiveValue::Set;

        Self {
            id: Set(turn.id),
            conversation_id: Set(turn.conversation_id),
            role: Set(turn.role.as_str().to_string()),
            content: Set(turn.content),
            image_object_key: Set(turn.image_object_key),
            created_at: Set(turn.created_at.fixed_offset()),
        }
    }
}
