use serde::{Deserialize, Serialize};

/// Wire response of the match-score endpoint. The server computes a float;
/// the dashboard displays it rounded to a whole percentage.
#[derive(Debug, Deserialize)]
pub struct MatchResponse {
    pub match_percentage: f64,
}

/// Skill-gap breakdown for one job, cached per session on explicit request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillGapReport {
    #[serde(default)]
    pub job_title: String,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    #[serde(default)]
    pub skill_match_ratio: f64,
}

/// Wire response of the rank trigger. Displayed list state always comes from
/// the follow-up applicant fetch, so callers only log this payload.
#[derive(Debug, Deserialize)]
pub struct RankOutcome {
    pub job_title: String,
    pub ranked_candidates: Vec<RankedCandidate>,
}

#[derive(Debug, Deserialize)]
pub struct RankedCandidate {
    pub user_id: i64,
    pub candidate: String,
    pub score: f64,
}
