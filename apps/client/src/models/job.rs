use serde::{Deserialize, Serialize};

/// A job posting as the listing endpoints return it. Listings omit the full
/// description; it is only sent at creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub required_skills: String,
}

/// Create-job form state. Lives in the recruiter orchestrator and is cleared
/// after a successful creation.
#[derive(Debug, Clone, Default)]
pub struct JobDraft {
    pub title: String,
    pub description: String,
    pub required_skills: String,
}

/// Wire response of the create-job endpoint.
#[derive(Debug, Deserialize)]
pub struct JobCreated {
    pub message: String,
    pub job_id: i64,
}
