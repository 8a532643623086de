//! Remote API boundary — the single point of entry for all server calls.
//!
//! ARCHITECTURAL RULE: no other module may talk to the server directly.
//! Orchestrators depend on the capability traits below; [`HttpApi`] is the
//! one implementation that actually goes over the wire, and test code
//! substitutes fakes.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

use crate::models::{
    Applicant, ApplicationSummary, DashboardSummary, Job, JobCreated, JobDraft, JobSummary,
    LoginResponse, MatchResponse, RankOutcome, RegisterRequest, ResumeInfo, ReviewDecision,
    SkillGapReport,
};

pub mod http;

pub use http::HttpApi;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server rejected the credential (HTTP 401). For authenticated
    /// actions this means session loss, never a transient failure.
    #[error("authentication rejected")]
    Unauthorized { detail: Option<String> },

    #[error("request failed with status {status}")]
    Status { status: u16, detail: Option<String> },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ApiError {
    /// Server-provided human-readable detail, when the body carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { detail } | ApiError::Status { detail, .. } => {
                detail.as_deref()
            }
            ApiError::Transport(_) => None,
        }
    }

    /// Display policy shared by every user-triggered action: prefer the
    /// server's structured detail, fall back to the action's own message.
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.detail().unwrap_or(fallback)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }
}

/// Unauthenticated endpoints: the login exchange and account creation.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError>;
    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError>;
}

/// Everything the candidate dashboard needs.
#[async_trait]
pub trait CandidateApi: Send + Sync {
    /// Presence probe. The server answers 200 either way; `None` means no
    /// resume is on file.
    async fn resume_probe(&self) -> Result<Option<ResumeInfo>, ApiError>;
    /// Uploads resume bytes, returning the server's acknowledgement message.
    async fn upload_resume(&self, filename: &str, bytes: Bytes) -> Result<String, ApiError>;
    async fn list_jobs(&self) -> Result<Vec<Job>, ApiError>;
    async fn my_applications(&self) -> Result<Vec<ApplicationSummary>, ApiError>;
    async fn apply(&self, job_id: i64) -> Result<String, ApiError>;
    async fn match_score(&self, job_id: i64) -> Result<MatchResponse, ApiError>;
    async fn skill_gap(&self, job_id: i64) -> Result<SkillGapReport, ApiError>;
}

/// Everything the recruiter dashboard needs.
#[async_trait]
pub trait RecruiterApi: Send + Sync {
    async fn my_jobs(&self) -> Result<Vec<Job>, ApiError>;
    async fn create_job(&self, draft: &JobDraft) -> Result<JobCreated, ApiError>;
    /// Triggers a server-side re-rank of every applicant for the job.
    async fn rank(&self, job_id: i64) -> Result<RankOutcome, ApiError>;
    async fn job_applications(&self, job_id: i64) -> Result<Vec<Applicant>, ApiError>;
    async fn update_status(
        &self,
        job_id: i64,
        user_id: i64,
        decision: ReviewDecision,
    ) -> Result<(), ApiError>;
    async fn download_resume(&self, resume_id: i64) -> Result<Bytes, ApiError>;
}

/// Read-only aggregate views for recruiters and admins.
#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    async fn dashboard_summary(&self) -> Result<DashboardSummary, ApiError>;
    async fn job_summary(&self, job_id: i64) -> Result<JobSummary, ApiError>;
}
