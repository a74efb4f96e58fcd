use std::time::Duration;

/// Application service shared by every bounded context.
///
/// Each domain implements its service trait on this struct, so one value
/// carries every port the orchestration code needs.
#[derive(Clone)]
pub struct Service<LA, CV, VS, HC, LLM, OCR, IS> {
    pub(crate) label_analysis_repository: LA,
    pub(crate) conversation_repository: CV,
    pub(crate) visitor_repository: VS,
    pub(crate) health_check_repository: HC,
    pub(crate) llm_client: LLM,
    pub(crate) text_extractor: OCR,
    pub(crate) image_storage: IS,
    pub(crate) model_timeout: Duration,
}

impl<LA, CV, VS, HC, LLM, OCR, IS> Service<LA, CV, VS, HC, LLM, OCR, IS> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        label_analysis_repository: LA,
        conversation_repository: CV,
        visitor_repository: VS,
        health_check_repository: HC,
        llm_client: LLM,
        text_extractor: OCR,
        image_storage: IS,
        model_timeout: Duration,
    ) -> Self {
        Self {
            label_analysis_repository,
            conversation_repository,
            visitor_repository,
            health_check_repository,
            llm_client,
            text_extractor,
            image_storage,
            model_timeout,
        }
    }
}
