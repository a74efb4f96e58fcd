pub mod ask_question;
pub mod get_conversation;
pub mod get_conversations;
