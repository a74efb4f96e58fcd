pub mod chat_turns;
pub mod conversations;
pub mod label_analyses;
pub mod visitors;
