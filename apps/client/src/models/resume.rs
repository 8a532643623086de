use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Probe payload when a resume exists. The server stores naive UTC
/// timestamps, hence `NaiveDateTime` rather than a zoned type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeInfo {
    pub resume_id: i64,
    pub uploaded_at: NaiveDateTime,
}
