use tracing::{error, info, warn};
use uuid::Uuid;

use crate::domain::{
    common::{entities::app_errors::CoreError, generate_uuid_v7, services::Service},
    conversation::ports::ConversationRepository,
    health::ports::HealthCheckRepository,
    label_analysis::{
        entities::{AnalysisOutcome, LabelAnalysis, LabelAnalysisConfig},
        parser::parse_analysis,
        ports::{
            LLMClient, LabelAnalysisRepository, LabelAnalysisService, LabelImageStorage,
            TextExtractor,
        },
        prompts::build_analysis_prompt,
        segmenter::{normalize_text, segment},
        value_objects::{
            AnalyzeLabelImageInput, AnalyzeLabelTextInput, GetLabelAnalysesInput,
            GetLabelAnalysisInput,
        },
    },
    visitor::ports::VisitorRepository,
};

pub const LABEL_OBJECT_PREFIX: &str = "labels";
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

pub fn label_object_key(analysis_id: Uuid, extension: &str) -> String {
    format!("{LABEL_OBJECT_PREFIX}/{analysis_id}.{extension}")
}

impl<LA, CV, VS, HC, LLM, OCR, IS> Service<LA, CV, VS, HC, LLM, OCR, IS>
where
    LA: LabelAnalysisRepository,
    VS: VisitorRepository,
    LLM: LLMClient,
{
    /// Runs one completion under the configured timeout.
    ///
    /// Every failure, elapsed timeouts included, comes back as
    /// `CoreError::ModelCallError`.
    pub(crate) async fn call_model(&self, prompt: String) -> Result<String, CoreError> {
        match tokio::time::timeout(self.model_timeout, self.llm_client.complete(prompt)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(CoreError::ModelCallError(message))) => {
                Err(CoreError::ModelCallError(message))
            }
            Ok(Err(e)) => Err(CoreError::ModelCallError(e.to_string())),
            Err(_) => Err(CoreError::ModelCallError(format!(
                "no response within {}s",
                self.model_timeout.as_secs()
            ))),
        }
    }

    /// Segments, prompts, parses and persists one analysis.
    ///
    /// A model failure does not abort: it is recorded as an `ERROR`
    /// analysis so it stays auditable.
    async fn run_analysis(
        &self,
        analysis_id: Uuid,
        visitor_id: Uuid,
        image_object_key: Option<String>,
        extracted_text: &str,
    ) -> Result<LabelAnalysis, CoreError> {
        let extracted_text = normalize_text(extracted_text);
        let sections = segment(&extracted_text);

        let prompt = build_analysis_prompt(
            &extracted_text,
            sections.ingredients_text(),
            sections.nutrition_text(),
        );

        let outcome = match self.call_model(prompt).await {
            Ok(raw) => parse_analysis(&raw),
            Err(e) => {
                error!("Model call failed for analysis {}: {}", analysis_id, e);
                AnalysisOutcome::model_failure(&e)
            }
        };

        let analysis = LabelAnalysis::new(LabelAnalysisConfig {
            id: analysis_id,
            visitor_id,
            image_object_key,
            extracted_text,
            sections,
            outcome,
        });
        let analysis = self.label_analysis_repository.create(analysis).await?;

        if let Err(e) = self.visitor_repository.record_analysis(visitor_id).await {
            warn!("Failed to update activity of visitor {}: {}", visitor_id, e);
        }

        info!(
            "Analysis {} stored with recommendation {} and score {}",
            analysis.id, analysis.recommendation, analysis.health_score
        );

        Ok(analysis)
    }
}

impl<LA, CV, VS, HC, LLM, OCR, IS> LabelAnalysisService for Service<LA, CV, VS, HC, LLM, OCR, IS>
where
    LA: LabelAnalysisRepository,
    CV: ConversationRepository,
    VS: VisitorRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
    OCR: TextExtractor,
    IS: LabelImageStorage,
{
    async fn analyze_label_image(
        &self,
        input: AnalyzeLabelImageInput,
    ) -> Result<LabelAnalysis, CoreError> {
        let image = input.image;

        let extracted_text = self
            .text_extractor
            .extract_text(image.data.clone())
            .await
            .map_err(|e| match e {
                CoreError::ExtractionError(_) => e,
                other => CoreError::ExtractionError(other.to_string()),
            })?;

        let analysis_id = generate_uuid_v7();
        let object_key = label_object_key(analysis_id, &image.extension());

        self.image_storage
            .put_object(object_key.clone(), image.data, image.content_type)
            .await?;

        self.run_analysis(
            analysis_id,
            input.visitor_id,
            Some(object_key),
            &extracted_text,
        )
        .await
    }

    async fn analyze_label_text(
        &self,
        input: AnalyzeLabelTextInput,
    ) -> Result<LabelAnalysis, CoreError> {
        if input.text.trim().is_empty() {
            return Err(CoreError::Invalid);
        }

        self.run_analysis(generate_uuid_v7(), input.visitor_id, None, &input.text)
            .await
    }

    async fn get_analysis(&self, input: GetLabelAnalysisInput) -> Result<LabelAnalysis, CoreError> {
        self.label_analysis_repository
            .get_by_id(input.analysis_id)
            .await?
            .filter(|analysis| analysis.visitor_id == input.visitor_id)
            .ok_or(CoreError::NotFound)
    }

    async fn list_analyses(
        &self,
        input: GetLabelAnalysesInput,
    ) -> Result<Vec<LabelAnalysis>, CoreError> {
        let mut filter = input.filter;
        filter.limit = Some(filter.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE));

        self.label_analysis_repository
            .list_by_visitor(input.visitor_id, filter)
            .await
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::domain::{
        common::fakes::Fixture,
        label_analysis::{
            entities::Recommendation,
            value_objects::{GetLabelAnalysesFilter, LabelImage},
        },
    };

    const LABEL_TEXT: &str = "Crunchy Oat Bar\n  Ingredients: rolled oats, honey, almonds\n\nNutrition Facts  Calories 190 Sodium 40mg";
    const MODEL_ANSWER: &str = "**RECOMMENDATION:** [EAT]\n**HEALTH SCORE:** 8\n**ANALYSIS:** Whole grains.\n**SUMMARY:** A sensible snack.";

    fn png(data: &'static [u8]) -> LabelImage {
        LabelImage {
            data: Bytes::from_static(data),
            content_type: "image/png".to_string(),
            file_name: Some("label.png".to_string()),
        }
    }

    #[tokio::test]
    async fn text_analysis_is_segmented_parsed_and_persisted() {
        let fixture = Fixture::new();
        fixture.model.push_ok(MODEL_ANSWER);
        let visitor = fixture.visitor().await;

        let analysis = fixture
            .service
            .analyze_label_text(AnalyzeLabelTextInput {
                visitor_id: visitor.id,
                text: LABEL_TEXT.to_string(),
            })
            .await
            .unwrap();

        assert_eq!(analysis.recommendation, Recommendation::Eat);
        assert_eq!(analysis.health_score, 8);
        assert_eq!(analysis.analysis, "Whole grains.");
        assert_eq!(analysis.summary, "A sensible snack.");
        assert_eq!(
            analysis.extracted_text,
            "Crunchy Oat Bar Ingredients: rolled oats, honey, almonds Nutrition Facts Calories 190 Sodium 40mg"
        );
        assert_eq!(analysis.ingredients_text, "Ingredients: rolled oats, honey, almonds");
        assert!(analysis.nutrition_text.starts_with("Nutrition Facts Calories 190"));
        assert_eq!(analysis.image_object_key, None);

        let prompt = fixture.model.prompts().pop().unwrap();
        assert!(prompt.contains("INGREDIENTS:\nIngredients: rolled oats, honey, almonds"));

        assert_eq!(fixture.analyses.all(), vec![analysis]);
        assert_eq!(fixture.visitors.get(visitor.id).total_analyses, 1);
    }

    #[tokio::test]
    async fn model_failure_is_persisted_as_error_analysis() {
        let fixture = Fixture::new();
        fixture
            .model
            .push_err(CoreError::ModelCallError("connection refused".to_string()));
        let visitor = fixture.visitor().await;

        let analysis = fixture
            .service
            .analyze_label_text(AnalyzeLabelTextInput {
                visitor_id: visitor.id,
                text: LABEL_TEXT.to_string(),
            })
            .await
            .unwrap();

        assert_eq!(analysis.recommendation, Recommendation::Error);
        assert_eq!(analysis.health_score, 0);
        assert!(analysis.analysis.starts_with("Analysis failed:"));
        assert!(analysis.raw_response.contains("connection refused"));
        assert_eq!(fixture.analyses.all().len(), 1);
    }

    #[tokio::test]
    async fn slow_model_counts_as_model_failure() {
        let fixture = Fixture::with_model_timeout(std::time::Duration::from_millis(20));
        fixture.model.push_delayed(MODEL_ANSWER, std::time::Duration::from_secs(5));
        let visitor = fixture.visitor().await;

        let analysis = fixture
            .service
            .analyze_label_text(AnalyzeLabelTextInput {
                visitor_id: visitor.id,
                text: LABEL_TEXT.to_string(),
            })
            .await
            .unwrap();

        assert_eq!(analysis.recommendation, Recommendation::Error);
    }

    #[tokio::test]
    async fn image_analysis_stores_the_label_after_ocr() {
        let fixture = Fixture::new();
        fixture.ocr.succeed_with(LABEL_TEXT);
        fixture.model.push_ok(MODEL_ANSWER);
        let visitor = fixture.visitor().await;

        let analysis = fixture
            .service
            .analyze_label_image(AnalyzeLabelImageInput {
                visitor_id: visitor.id,
                image: png(b"png-bytes"),
            })
            .await
            .unwrap();

        let key = analysis.image_object_key.clone().unwrap();
        assert_eq!(key, format!("labels/{}.png", analysis.id));
        assert_eq!(fixture.images.keys(), vec![key]);
    }

    #[tokio::test]
    async fn ocr_failure_aborts_without_persisting() {
        let fixture = Fixture::new();
        fixture.ocr.fail_with("tesseract exited with status 1");
        let visitor = fixture.visitor().await;

        let result = fixture
            .service
            .analyze_label_image(AnalyzeLabelImageInput {
                visitor_id: visitor.id,
                image: png(b"broken"),
            })
            .await;

        assert!(matches!(result, Err(CoreError::ExtractionError(_))));
        assert!(fixture.analyses.all().is_empty());
        assert!(fixture.images.keys().is_empty());
        assert!(fixture.model.prompts().is_empty());
        assert_eq!(fixture.visitors.get(visitor.id).total_analyses, 0);
    }

    #[tokio::test]
    async fn blank_text_is_rejected() {
        let fixture = Fixture::new();
        let visitor = fixture.visitor().await;

        let result = fixture
            .service
            .analyze_label_text(AnalyzeLabelTextInput {
                visitor_id: visitor.id,
                text: " \n ".to_string(),
            })
            .await;

        assert_eq!(result, Err(CoreError::Invalid));
    }

    #[tokio::test]
    async fn other_visitors_analyses_are_not_found() {
        let fixture = Fixture::new();
        fixture.model.push_ok(MODEL_ANSWER);
        let owner = fixture.visitor().await;
        let stranger = fixture.visitor().await;

        let analysis = fixture
            .service
            .analyze_label_text(AnalyzeLabelTextInput {
                visitor_id: owner.id,
                text: LABEL_TEXT.to_string(),
            })
            .await
            .unwrap();

        let found = fixture
            .service
            .get_analysis(GetLabelAnalysisInput {
                visitor_id: owner.id,
                analysis_id: analysis.id,
            })
            .await;
        assert_eq!(found, Ok(analysis.clone()));

        let hidden = fixture
            .service
            .get_analysis(GetLabelAnalysisInput {
                visitor_id: stranger.id,
                analysis_id: analysis.id,
            })
            .await;
        assert_eq!(hidden, Err(CoreError::NotFound));
    }

    #[tokio::test]
    async fn listing_is_newest_first_and_filtered() {
        let fixture = Fixture::new();
        fixture.model.push_ok(MODEL_ANSWER);
        fixture
            .model
            .push_ok("**RECOMMENDATION:** [AVOID]\n**HEALTH SCORE:** 2");
        let visitor = fixture.visitor().await;

        for text in ["Ingredients: oats", "Ingredients: sugar"] {
            fixture
                .service
                .analyze_label_text(AnalyzeLabelTextInput {
                    visitor_id: visitor.id,
                    text: text.to_string(),
                })
                .await
                .unwrap();
        }

        let all = fixture
            .service
            .list_analyses(GetLabelAnalysesInput {
                visitor_id: visitor.id,
                filter: GetLabelAnalysesFilter::default(),
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].recommendation, Recommendation::Avoid);

        let eat_only = fixture
            .service
            .list_analyses(GetLabelAnalysesInput {
                visitor_id: visitor.id,
                filter: GetLabelAnalysesFilter {
                    recommendation: Some(Recommendation::Eat),
                    ..Default::default()
                },
            })
            .await
            .unwrap();
        assert_eq!(eat_only.len(), 1);
        assert_eq!(eat_only[0].ingredients_text, "Ingredients: oats");
    }
}
