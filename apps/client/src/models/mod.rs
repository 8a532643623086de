// Wire models for the TalentIQ API, one file per entity.
// Listing endpoints return trimmed shapes (e.g. jobs without descriptions);
// the structs here mirror what the server actually sends, not the schema.

pub mod analytics;
pub mod application;
pub mod auth;
pub mod job;
pub mod matching;
pub mod resume;

pub use analytics::{DashboardSummary, JobSummary};
pub use application::{Applicant, ApplicationStatus, ApplicationSummary, ReviewDecision};
pub use auth::{Credential, Identity, LoginResponse, RegisterRequest, Role};
pub use job::{Job, JobCreated, JobDraft};
pub use matching::{MatchResponse, RankOutcome, RankedCandidate, SkillGapReport};
pub use resume::ResumeInfo;
