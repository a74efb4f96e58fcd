use chrono::{DateTime, Utc};
use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    health::entities::{HealthReport, UsageStats},
};

#[cfg_attr(test, mockall::automock)]
pub trait HealthCheckRepository: Send + Sync {
    /// Round-trips a trivial query; returns the elapsed milliseconds.
    fn readiness(&self) -> impl Future<Output = Result<u64, CoreError>> + Send;

    fn usage_stats(
        &self,
        since: DateTime<Utc>,
    ) -> impl Future<Output = Result<UsageStats, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait HealthCheckService: Send + Sync {
    fn health_report(&self) -> impl Future<Output = Result<HealthReport, CoreError>> + Send;
}
