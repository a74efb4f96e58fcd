use std::future::Future;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    visitor::{entities::Visitor, value_objects::ResolveVisitorInput},
};

#[cfg_attr(test, mockall::automock)]
pub trait VisitorRepository: Send + Sync {
    fn get_by_session_key(
        &self,
        session_key: String,
    ) -> impl Future<Output = Result<Option<Visitor>, CoreError>> + Send;

    fn create(&self, visitor: Visitor) -> impl Future<Output = Result<Visitor, CoreError>> + Send;

    /// Refreshes `last_activity` and the latest client details.
    fn touch(
        &self,
        visitor_id: Uuid,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> impl Future<Output = Result<Visitor, CoreError>> + Send;

    /// Bumps `total_analyses` by one and refreshes `last_activity`.
    fn record_analysis(&self, visitor_id: Uuid)
    -> impl Future<Output = Result<(), CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait VisitorService: Send + Sync {
    /// Finds the visitor for a session id, registering it on first sight.
    fn resolve_visitor(
        &self,
        input: ResolveVisitorInput,
    ) -> impl Future<Output = Result<Visitor, CoreError>> + Send;
}
