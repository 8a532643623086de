//! Read-only analytics views: one fetch, one value, no orchestration state.

use std::sync::Arc;

use crate::api::{AnalyticsApi, ApiError};
use crate::models::{DashboardSummary, JobSummary};

pub struct AnalyticsView {
    api: Arc<dyn AnalyticsApi>,
}

impl AnalyticsView {
    pub fn new(api: Arc<dyn AnalyticsApi>) -> Self {
        Self { api }
    }

    /// Aggregate summary across every job the viewer can see.
    pub async fn dashboard(&self) -> Result<DashboardSummary, ApiError> {
        self.api.dashboard_summary().await
    }

    /// Per-job breakdown.
    pub async fn job(&self, job_id: i64) -> Result<JobSummary, ApiError> {
        self.api.job_summary(job_id).await
    }
}
