pub mod conversation;
pub mod db;
pub mod health;
pub mod label_analysis;
pub mod llm;
pub mod object_storage;
pub mod ocr;
pub mod visitor;
