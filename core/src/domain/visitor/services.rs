use tracing::{debug, warn};

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    conversation::ports::ConversationRepository,
    health::ports::HealthCheckRepository,
    label_analysis::ports::{
        LLMClient, LabelAnalysisRepository, LabelImageStorage, TextExtractor,
    },
    visitor::{
        entities::{Visitor, hash_session_id},
        ports::{VisitorRepository, VisitorService},
        value_objects::ResolveVisitorInput,
    },
};

impl<LA, CV, VS, HC, LLM, OCR, IS> VisitorService for Service<LA, CV, VS, HC, LLM, OCR, IS>
where
    LA: LabelAnalysisRepository,
    CV: ConversationRepository,
    VS: VisitorRepository,
    HC: HealthCheckRepository,
    LLM: LLMClient,
    OCR: TextExtractor,
    IS: LabelImageStorage,
{
    async fn resolve_visitor(&self, input: ResolveVisitorInput) -> Result<Visitor, CoreError> {
        let session_id = input.session_id.trim();
        if session_id.is_empty() {
            return Err(CoreError::Invalid);
        }

        let session_key = hash_session_id(session_id);

        if let Some(visitor) = self
            .visitor_repository
            .get_by_session_key(session_key.clone())
            .await?
        {
            return self
                .visitor_repository
                .touch(visitor.id, input.ip_address, input.user_agent)
                .await;
        }

        let visitor = Visitor::new(session_id, input.ip_address, input.user_agent);
        debug!("Registering visitor {}", visitor.id);

        match self.visitor_repository.create(visitor).await {
            Ok(visitor) => Ok(visitor),
            Err(e) => {
                // Another request for the same session may have won the insert.
                warn!("Visitor insert failed, retrying lookup: {}", e);
                self.visitor_repository
                    .get_by_session_key(session_key)
                    .await?
                    .ok_or(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::fakes::Fixture;

    fn input(session_id: &str, user_agent: &str) -> ResolveVisitorInput {
        ResolveVisitorInput {
            session_id: session_id.to_string(),
            ip_address: Some("203.0.113.7".to_string()),
            user_agent: Some(user_agent.to_string()),
        }
    }

    #[tokio::test]
    async fn same_session_resolves_to_same_visitor() {
        let fixture = Fixture::new();

        let first = fixture
            .service
            .resolve_visitor(input("session-1", "agent/1"))
            .await
            .unwrap();
        let again = fixture
            .service
            .resolve_visitor(input("session-1", "agent/2"))
            .await
            .unwrap();

        assert_eq!(first.id, again.id);
        assert_eq!(again.user_agent.as_deref(), Some("agent/2"));
        assert!(again.last_activity >= first.last_activity);
        assert_eq!(fixture.visitors.len(), 1);
    }

    #[tokio::test]
    async fn raw_session_id_is_not_stored() {
        let fixture = Fixture::new();

        let visitor = fixture
            .service
            .resolve_visitor(input("secret-session", "agent"))
            .await
            .unwrap();

        assert_ne!(visitor.session_key, "secret-session");
        assert_eq!(visitor.session_key, hash_session_id("secret-session"));
    }

    #[tokio::test]
    async fn blank_session_is_invalid() {
        let fixture = Fixture::new();

        let result = fixture.service.resolve_visitor(input("  ", "agent")).await;

        assert_eq!(result, Err(CoreError::Invalid));
    }
}
