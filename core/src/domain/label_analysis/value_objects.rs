use bytes::Bytes;
use uuid::Uuid;

use crate::domain::label_analysis::entities::Recommendation;

/// An uploaded label photo as received from the client.
#[derive(Debug, Clone)]
pub struct LabelImage {
    pub data: Bytes,
    pub content_type: String,
    pub file_name: Option<String>,
}

impl LabelImage {
    /// File extension used for the stored object.
    ///
    /// Taken from the file name when it has one, otherwise from the content
    /// type subtype (`image/png` gives `png`).
    pub fn extension(&self) -> String {
        let from_name = self
            .file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.trim())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()));

        let ext = from_name.unwrap_or_else(|| {
            self.content_type
                .split_once('/')
                .map(|(_, subtype)| subtype.split(';').next().unwrap_or(subtype).trim())
                .filter(|subtype| !subtype.is_empty())
                .unwrap_or("bin")
        });

        match ext.to_ascii_lowercase().as_str() {
            "jpeg" => "jpg".to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AnalyzeLabelImageInput {
    pub visitor_id: Uuid,
    pub image: LabelImage,
}

#[derive(Debug, Clone)]
pub struct AnalyzeLabelTextInput {
    pub visitor_id: Uuid,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct GetLabelAnalysisInput {
    pub visitor_id: Uuid,
    pub analysis_id: Uuid,
}

#[derive(Debug, Clone, Default)]
pub struct GetLabelAnalysesFilter {
    pub recommendation: Option<Recommendation>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct GetLabelAnalysesInput {
    pub visitor_id: Uuid,
    pub filter: GetLabelAnalysesFilter,
}
