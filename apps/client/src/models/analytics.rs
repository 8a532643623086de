use serde::{Deserialize, Serialize};

/// Aggregate summary across all jobs the viewer can see (a recruiter's own
/// postings; everything for admins).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_jobs: u64,
    pub total_applications: u64,
    pub shortlisted: u64,
    pub rejected: u64,
    pub applied: u64,
    pub average_match_score: f64,
}

/// Per-job breakdown of application volume and scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSummary {
    pub job_title: String,
    pub total_applications: u64,
    pub shortlisted: u64,
    pub rejected: u64,
    pub applied: u64,
    pub average_score: f64,
}
