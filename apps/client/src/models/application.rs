use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle of an application. Forward-only: `applied` is the entry state
/// and the other two are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    Rejected,
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ApplicationStatus::Applied => "applied",
            ApplicationStatus::Shortlisted => "shortlisted",
            ApplicationStatus::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

/// One row of the candidate's "My Applications" listing. The server joins
/// the job title in and carries its last computed score.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationSummary {
    pub job_id: i64,
    pub job_title: String,
    pub status: ApplicationStatus,
    pub score: f64,
}

/// One applicant row in the recruiter's per-job listing. `resume_id` is
/// absent when the candidate's resume was deleted or never attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Applicant {
    pub user_id: i64,
    pub user_name: String,
    pub resume_id: Option<i64>,
    pub status: ApplicationStatus,
    pub score: f64,
}

/// The only transitions a reviewer may apply. There is no way back to
/// `applied`, so it is not representable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewDecision {
    Shortlisted,
    Rejected,
}

impl ReviewDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewDecision::Shortlisted => "shortlisted",
            ReviewDecision::Rejected => "rejected",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("status must be 'shortlisted' or 'rejected'")]
pub struct InvalidDecision;

impl FromStr for ReviewDecision {
    type Err = InvalidDecision;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shortlisted" => Ok(ReviewDecision::Shortlisted),
            "rejected" => Ok(ReviewDecision::Rejected),
            _ => Err(InvalidDecision),
        }
    }
}
