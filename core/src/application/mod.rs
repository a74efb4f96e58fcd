use crate::{
    domain::common::{NutriScanConfig, entities::app_errors::CoreError, services::Service},
    infrastructure::{
        conversation::repositories::PostgresConversationRepository,
        db::postgres::Postgres,
        health::repositories::PostgresHealthCheckRepository,
        label_analysis::repositories::PostgresLabelAnalysisRepository,
        llm::AnyLLMClient,
        object_storage::MinioLabelImageStorage,
        ocr::TesseractTextExtractor,
        visitor::repositories::PostgresVisitorRepository,
    },
};

pub type NutriScanService = Service<
    PostgresLabelAnalysisRepository,
    PostgresConversationRepository,
    PostgresVisitorRepository,
    PostgresHealthCheckRepository,
    AnyLLMClient,
    TesseractTextExtractor,
    MinioLabelImageStorage,
>;

/// Wires every adapter from configuration into one service value.
pub async fn create_service(config: NutriScanConfig) -> Result<NutriScanService, CoreError> {
    let postgres = Postgres::new(&config.database).await?;

    let llm_client = AnyLLMClient::from_config(&config.llm)?;
    let text_extractor = TesseractTextExtractor::new(&config.ocr);
    let image_storage = MinioLabelImageStorage::new(&config.object_storage);

    Ok(Service::new(
        PostgresLabelAnalysisRepository::new(postgres.get_db()),
        PostgresConversationRepository::new(postgres.get_db()),
        PostgresVisitorRepository::new(postgres.get_db()),
        PostgresHealthCheckRepository::new(postgres.get_db()),
        llm_client,
        text_extractor,
        image_storage,
        config.llm.timeout,
    ))
}
