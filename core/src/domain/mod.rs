pub mod common;
pub mod conversation;
pub mod health;
pub mod label_analysis;
pub mod visitor;
