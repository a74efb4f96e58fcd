use crate::application::http::{
    conversation::router::{ChatApiDoc, ConversationApiDoc},
    health::router::HealthApiDoc,
    label_analysis::router::LabelAnalysisApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "NutriScan API"
    ),
    nest(
        (path = "/labels", api = LabelAnalysisApiDoc),
        (path = "/labels", api = ChatApiDoc),
        (path = "/conversations", api = ConversationApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
