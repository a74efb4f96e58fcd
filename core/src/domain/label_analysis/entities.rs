use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Recommendation {
    Eat,
    Avoid,
    Moderate,
    Error,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::Eat => "EAT",
            Recommendation::Avoid => "AVOID",
            Recommendation::Moderate => "MODERATE",
            Recommendation::Error => "ERROR",
        }
    }
}

impl From<&str> for Recommendation {
    fn from(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "EAT" => Recommendation::Eat,
            "AVOID" => Recommendation::Avoid,
            "ERROR" => Recommendation::Error,
            _ => Recommendation::Moderate,
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contiguous slice of normalized label text.
///
/// `start` and `end` are byte offsets into the normalized text the span was
/// cut from, `text` is the trimmed content between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Ingredient and nutrition candidates found in one label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LabelSections {
    pub ingredients: Option<TextSpan>,
    pub nutrition: Option<TextSpan>,
}

impl LabelSections {
    pub fn ingredients_text(&self) -> &str {
        self.ingredients.as_ref().map_or("", |span| span.text.as_str())
    }

    pub fn nutrition_text(&self) -> &str {
        self.nutrition.as_ref().map_or("", |span| span.text.as_str())
    }
}

/// Typed fields recovered from one model response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisOutcome {
    pub recommendation: Recommendation,
    pub health_score: i32,
    pub analysis: String,
    pub summary: String,
    pub raw_response: String,
}

impl AnalysisOutcome {
    /// Outcome recorded when the model could not be reached at all.
    pub fn model_failure(error: &CoreError) -> Self {
        Self {
            recommendation: Recommendation::Error,
            health_score: 0,
            analysis: format!("Analysis failed: {}", error),
            summary: "Unable to analyze due to an error".to_string(),
            raw_response: format!("Error: {}", error),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LabelAnalysis {
    pub id: Uuid,
    pub visitor_id: Uuid,
    pub image_object_key: Option<String>,
    pub extracted_text: String,
    pub ingredients_text: String,
    pub nutrition_text: String,
    pub recommendation: Recommendation,
    pub health_score: i32,
    pub analysis: String,
    pub summary: String,
    pub raw_response: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct LabelAnalysisConfig {
    pub id: Uuid,
    pub visitor_id: Uuid,
    pub image_object_key: Option<String>,
    pub extracted_text: String,
    pub sections: LabelSections,
    pub outcome: AnalysisOutcome,
}

impl LabelAnalysis {
    pub fn new(config: LabelAnalysisConfig) -> Self {
        let LabelAnalysisConfig {
            id,
            visitor_id,
            image_object_key,
            extracted_text,
            sections,
            outcome,
        } = config;

        Self {
            id,
            visitor_id,
            image_object_key,
            extracted_text,
            ingredients_text: sections.ingredients_text().to_string(),
            nutrition_text: sections.nutrition_text().to_string(),
            recommendation: outcome.recommendation,
            health_score: outcome.health_score,
            analysis: outcome.analysis,
            summary: outcome.summary,
            raw_response: outcome.raw_response,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommendation_labels_are_case_insensitive() {
        assert_eq!(Recommendation::from("eat"), Recommendation::Eat);
        assert_eq!(Recommendation::from(" Avoid "), Recommendation::Avoid);
        assert_eq!(Recommendation::from("MODERATE"), Recommendation::Moderate);
    }

    #[test]
    fn unknown_recommendation_label_is_moderate() {
        assert_eq!(
            Recommendation::from("EAT / AVOID / MODERATE"),
            Recommendation::Moderate
        );
        assert_eq!(Recommendation::from(""), Recommendation::Moderate);
    }

    #[test]
    fn model_failure_outcome_is_an_error_with_zero_score() {
        let outcome =
            AnalysisOutcome::model_failure(&CoreError::ModelCallError("refused".to_string()));

        assert_eq!(outcome.recommendation, Recommendation::Error);
        assert_eq!(outcome.health_score, 0);
        assert!(outcome.analysis.starts_with("Analysis failed:"));
        assert!(outcome.analysis.contains("refused"));
        assert_eq!(outcome.summary, "Unable to analyze due to an error");
        assert!(outcome.raw_response.starts_with("Error:"));
    }
}
