pub mod conversation;
pub mod health;
pub mod label_analysis;
pub mod query_extractor;
pub mod query_params;
pub mod server;
