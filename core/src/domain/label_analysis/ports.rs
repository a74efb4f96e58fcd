use bytes::Bytes;
use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    label_analysis::{
        entities::LabelAnalysis,
        value_objects::{
            AnalyzeLabelImageInput, AnalyzeLabelTextInput, GetLabelAnalysesFilter,
            GetLabelAnalysesInput, GetLabelAnalysisInput,
        },
    },
};

/// Repository trait for persisted label analyses
#[cfg_attr(test, mockall::automock)]
pub trait LabelAnalysisRepository: Send + Sync {
    fn create(
        &self,
        analysis: LabelAnalysis,
    ) -> impl Future<Output = Result<LabelAnalysis, CoreError>> + Send;

    fn get_by_id(
        &self,
        analysis_id: Uuid,
    ) -> impl Future<Output = Result<Option<LabelAnalysis>, CoreError>> + Send;

    /// Analyses of one visitor, newest first.
    fn list_by_visitor(
        &self,
        visitor_id: Uuid,
        filter: GetLabelAnalysesFilter,
    ) -> impl Future<Output = Result<Vec<LabelAnalysis>, CoreError>> + Send;
}

/// LLM Client trait for calling a text completion model
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Sends one prompt and returns the model's full answer text.
    fn complete(&self, prompt: String) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// OCR engine turning label photos into text
#[cfg_attr(test, mockall::automock)]
pub trait TextExtractor: Send + Sync {
    fn extract_text(&self, image: Bytes)
    -> impl Future<Output = Result<String, CoreError>> + Send;

    /// Version banner of the engine, used by the health check.
    fn engine_version(&self) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Blob storage for the original label photos
#[cfg_attr(test, mockall::automock)]
pub trait LabelImageStorage: Send + Sync {
    fn put_object(
        &self,
        object_key: String,
        payload: Bytes,
        content_type: String,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Service trait for label analysis business logic
#[cfg_attr(test, mockall::automock)]
pub trait LabelAnalysisService: Send + Sync {
    fn analyze_label_image(
        &self,
        input: AnalyzeLabelImageInput,
    ) -> impl Future<Output = Result<LabelAnalysis, CoreError>> + Send;

    fn analyze_label_text(
        &self,
        input: AnalyzeLabelTextInput,
    ) -> impl Future<Output = Result<LabelAnalysis, CoreError>> + Send;

    fn get_analysis(
        &self,
        input: GetLabelAnalysisInput,
    ) -> impl Future<Output = Result<LabelAnalysis, CoreError>> + Send;

    fn list_analyses(
        &self,
        input: GetLabelAnalysesInput,
    ) -> impl Future<Output = Result<Vec<LabelAnalysis>, CoreError>> + Send;
}
