//! Shared in-memory stand-in for the remote API server.
//!
//! Implements every capability trait with the same observable behavior the
//! real server has (error details included), tracks "who is logged in" the
//! way the bearer token does, and lets tests inject artificial latency into
//! the applicant fetch to exercise the stale-response rules.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::NaiveDate;

use client::api::{AnalyticsApi, ApiError, AuthApi, CandidateApi, RecruiterApi};
use client::models::{
    Applicant, ApplicationStatus, ApplicationSummary, DashboardSummary, Job, JobCreated, JobDraft,
    JobSummary, LoginResponse, MatchResponse, RankOutcome, RankedCandidate, RegisterRequest,
    ResumeInfo, ReviewDecision, SkillGapReport,
};

struct UserRow {
    id: i64,
    name: String,
    email: String,
    password: String,
    role: client::models::Role,
}

struct JobRow {
    recruiter_id: i64,
    job: Job,
}

struct AppRow {
    job_id: i64,
    user_id: i64,
    status: ApplicationStatus,
    score: f64,
}

#[derive(Default)]
struct ServerState {
    users: Vec<UserRow>,
    jobs: Vec<JobRow>,
    applications: Vec<AppRow>,
    resumes: HashMap<i64, i64>,
    resume_blobs: HashMap<i64, Vec<u8>>,
    next_resume_id: i64,
    next_job_id: i64,
    current_user: Option<i64>,
}

pub struct FakeServer {
    state: Mutex<ServerState>,
    applicant_fetch_delays: Mutex<VecDeque<Duration>>,
}

fn bad_request(detail: &str) -> ApiError {
    ApiError::Status {
        status: 400,
        detail: Some(detail.to_string()),
    }
}

fn not_found(detail: &str) -> ApiError {
    ApiError::Status {
        status: 404,
        detail: Some(detail.to_string()),
    }
}

impl FakeServer {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ServerState {
                next_resume_id: 100,
                next_job_id: 1,
                ..ServerState::default()
            }),
            applicant_fetch_delays: Mutex::new(VecDeque::new()),
        }
    }

    pub fn seed_user(
        &self,
        id: i64,
        name: &str,
        email: &str,
        password: &str,
        role: client::models::Role,
    ) {
        self.state.lock().unwrap().users.push(UserRow {
            id,
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role,
        });
    }

    pub fn seed_job(&self, id: i64, recruiter_id: i64, title: &str, required_skills: &str) {
        let mut state = self.state.lock().unwrap();
        state.next_job_id = state.next_job_id.max(id + 1);
        state.jobs.push(JobRow {
            recruiter_id,
            job: Job {
                id,
                title: title.to_string(),
                required_skills: required_skills.to_string(),
            },
        });
    }

    pub fn seed_application(&self, job_id: i64, user_id: i64) {
        self.state.lock().unwrap().applications.push(AppRow {
            job_id,
            user_id,
            status: ApplicationStatus::Applied,
            score: 0.0,
        });
    }

    pub fn seed_resume(&self, user_id: i64) -> i64 {
        let mut state = self.state.lock().unwrap();
        let resume_id = state.next_resume_id;
        state.next_resume_id += 1;
        state.resumes.insert(user_id, resume_id);
        state
            .resume_blobs
            .insert(resume_id, b"%PDF-1.4 seeded".to_vec());
        resume_id
    }

    /// Queue a delay for the next applicant-list fetch. Pair with a paused
    /// tokio clock for deterministic interleavings.
    pub fn delay_next_applicant_fetch(&self, delay: Duration) {
        self.applicant_fetch_delays
            .lock()
            .unwrap()
            .push_back(delay);
    }

    fn current_user_id(state: &ServerState) -> Result<i64, ApiError> {
        state
            .current_user
            .ok_or(ApiError::Unauthorized { detail: None })
    }

    fn job_title(state: &ServerState, job_id: i64) -> String {
        state
            .jobs
            .iter()
            .find(|row| row.job.id == job_id)
            .map(|row| row.job.title.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    fn visible_job_ids(state: &ServerState, viewer: i64) -> Vec<i64> {
        let is_admin = state
            .users
            .iter()
            .any(|u| u.id == viewer && u.role == client::models::Role::Admin);
        state
            .jobs
            .iter()
            .filter(|row| is_admin || row.recruiter_id == viewer)
            .map(|row| row.job.id)
            .collect()
    }

    fn summarize(state: &ServerState, job_ids: &[i64]) -> (u64, u64, u64, u64, f64) {
        let rows: Vec<&AppRow> = state
            .applications
            .iter()
            .filter(|row| job_ids.contains(&row.job_id))
            .collect();
        let total = rows.len() as u64;
        let count = |status: ApplicationStatus| {
            rows.iter().filter(|row| row.status == status).count() as u64
        };
        let average = if rows.is_empty() {
            0.0
        } else {
            rows.iter().map(|row| row.score).sum::<f64>() / rows.len() as f64
        };
        (
            total,
            count(ApplicationStatus::Applied),
            count(ApplicationStatus::Shortlisted),
            count(ApplicationStatus::Rejected),
            average,
        )
    }
}

#[async_trait]
impl AuthApi for FakeServer {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let mut state = self.state.lock().unwrap();
        let found = state
            .users
            .iter()
            .find(|user| user.email == email && user.password == password)
            .map(|user| (user.id, user.role));
        match found {
            Some((id, role)) => {
                state.current_user = Some(id);
                Ok(LoginResponse {
                    access_token: format!("token-{id}"),
                    role,
                })
            }
            None => Err(ApiError::Unauthorized {
                detail: Some("Invalid email or password".to_string()),
            }),
        }
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        if state.users.iter().any(|user| user.email == request.email) {
            return Err(bad_request("Email already registered"));
        }
        let id = state.users.len() as i64 + 1;
        state.users.push(UserRow {
            id,
            name: request.name.clone(),
            email: request.email.clone(),
            password: request.password.clone(),
            role: request.role,
        });
        Ok(())
    }
}

#[async_trait]
impl CandidateApi for FakeServer {
    async fn resume_probe(&self) -> Result<Option<ResumeInfo>, ApiError> {
        let state = self.state.lock().unwrap();
        let user_id = Self::current_user_id(&state)?;
        Ok(state.resumes.get(&user_id).map(|&resume_id| ResumeInfo {
            resume_id,
            uploaded_at: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        }))
    }

    async fn upload_resume(&self, _filename: &str, bytes: Bytes) -> Result<String, ApiError> {
        let mut state = self.state.lock().unwrap();
        let user_id = Self::current_user_id(&state)?;
        let resume_id = state.next_resume_id;
        state.next_resume_id += 1;
        state.resumes.insert(user_id, resume_id);
        state.resume_blobs.insert(resume_id, bytes.to_vec());
        Ok("Resume uploaded successfully 🚀".to_string())
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, ApiError> {
        let state = self.state.lock().unwrap();
        Self::current_user_id(&state)?;
        Ok(state.jobs.iter().map(|row| row.job.clone()).collect())
    }

    async fn my_applications(&self) -> Result<Vec<ApplicationSummary>, ApiError> {
        let state = self.state.lock().unwrap();
        let user_id = Self::current_user_id(&state)?;
        Ok(state
            .applications
            .iter()
            .filter(|row| row.user_id == user_id)
            .map(|row| ApplicationSummary {
                job_id: row.job_id,
                job_title: Self::job_title(&state, row.job_id),
                status: row.status,
                score: row.score,
            })
            .collect())
    }

    async fn apply(&self, job_id: i64) -> Result<String, ApiError> {
        let mut state = self.state.lock().unwrap();
        let user_id = Self::current_user_id(&state)?;
        if !state.jobs.iter().any(|row| row.job.id == job_id) {
            return Err(not_found("Job not found"));
        }
        if !state.resumes.contains_key(&user_id) {
            return Err(bad_request("Please upload your resume before applying"));
        }
        if state
            .applications
            .iter()
            .any(|row| row.job_id == job_id && row.user_id == user_id)
        {
            return Err(bad_request("Already applied"));
        }
        state.applications.push(AppRow {
            job_id,
            user_id,
            status: ApplicationStatus::Applied,
            score: 0.0,
        });
        Ok("Application submitted successfully 🚀".to_string())
    }

    async fn match_score(&self, job_id: i64) -> Result<MatchResponse, ApiError> {
        let state = self.state.lock().unwrap();
        let user_id = Self::current_user_id(&state)?;
        if !state.resumes.contains_key(&user_id) {
            return Err(bad_request("Upload resume before checking match score"));
        }
        if !state.jobs.iter().any(|row| row.job.id == job_id) {
            return Err(not_found("Job not found"));
        }
        Ok(MatchResponse {
            match_percentage: 76.5,
        })
    }

    async fn skill_gap(&self, job_id: i64) -> Result<SkillGapReport, ApiError> {
        let state = self.state.lock().unwrap();
        let user_id = Self::current_user_id(&state)?;
        if !state.resumes.contains_key(&user_id) {
            return Err(bad_request("Upload resume before checking skill gap"));
        }
        if !state.jobs.iter().any(|row| row.job.id == job_id) {
            return Err(not_found("Job not found"));
        }
        Ok(SkillGapReport {
            job_title: Self::job_title(&state, job_id),
            matched_skills: vec!["rust".to_string()],
            missing_skills: vec!["kubernetes".to_string()],
            skill_match_ratio: 0.5,
        })
    }
}

#[async_trait]
impl RecruiterApi for FakeServer {
    async fn my_jobs(&self) -> Result<Vec<Job>, ApiError> {
        let state = self.state.lock().unwrap();
        let viewer = Self::current_user_id(&state)?;
        let visible = Self::visible_job_ids(&state, viewer);
        Ok(state
            .jobs
            .iter()
            .filter(|row| visible.contains(&row.job.id))
            .map(|row| row.job.clone())
            .collect())
    }

    async fn create_job(&self, draft: &JobDraft) -> Result<JobCreated, ApiError> {
        let mut state = self.state.lock().unwrap();
        let recruiter_id = Self::current_user_id(&state)?;
        let id = state.next_job_id;
        state.next_job_id += 1;
        state.jobs.push(JobRow {
            recruiter_id,
            job: Job {
                id,
                title: draft.title.clone(),
                required_skills: draft.required_skills.to_lowercase(),
            },
        });
        Ok(JobCreated {
            message: "Job created successfully 🚀".to_string(),
            job_id: id,
        })
    }

    async fn rank(&self, job_id: i64) -> Result<RankOutcome, ApiError> {
        let mut state = self.state.lock().unwrap();
        Self::current_user_id(&state)?;
        if !state.jobs.iter().any(|row| row.job.id == job_id) {
            return Err(not_found("Job not found"));
        }
        let mut ranked = Vec::new();
        for row in state
            .applications
            .iter_mut()
            .filter(|row| row.job_id == job_id)
        {
            // Deterministic stand-in for the matching engine.
            row.score = 50.0 + (row.user_id % 50) as f64;
            ranked.push((row.user_id, row.score));
        }
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        let job_title = Self::job_title(&state, job_id);
        let ranked_candidates = ranked
            .into_iter()
            .map(|(user_id, score)| RankedCandidate {
                user_id,
                candidate: state
                    .users
                    .iter()
                    .find(|user| user.id == user_id)
                    .map(|user| user.name.clone())
                    .unwrap_or_default(),
                score,
            })
            .collect();
        Ok(RankOutcome {
            job_title,
            ranked_candidates,
        })
    }

    async fn job_applications(&self, job_id: i64) -> Result<Vec<Applicant>, ApiError> {
        let delay = self.applicant_fetch_delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let state = self.state.lock().unwrap();
        Self::current_user_id(&state)?;
        Ok(state
            .applications
            .iter()
            .filter(|row| row.job_id == job_id)
            .map(|row| Applicant {
                user_id: row.user_id,
                user_name: state
                    .users
                    .iter()
                    .find(|user| user.id == row.user_id)
                    .map(|user| user.name.clone())
                    .unwrap_or_default(),
                resume_id: state.resumes.get(&row.user_id).copied(),
                status: row.status,
                score: row.score,
            })
            .collect())
    }

    async fn update_status(
        &self,
        job_id: i64,
        user_id: i64,
        decision: ReviewDecision,
    ) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        Self::current_user_id(&state)?;
        let row = state
            .applications
            .iter_mut()
            .find(|row| row.job_id == job_id && row.user_id == user_id)
            .ok_or_else(|| not_found("Match not found"))?;
        row.status = match decision {
            ReviewDecision::Shortlisted => ApplicationStatus::Shortlisted,
            ReviewDecision::Rejected => ApplicationStatus::Rejected,
        };
        Ok(())
    }

    async fn download_resume(&self, resume_id: i64) -> Result<Bytes, ApiError> {
        let state = self.state.lock().unwrap();
        Self::current_user_id(&state)?;
        state
            .resume_blobs
            .get(&resume_id)
            .map(|blob| Bytes::from(blob.clone()))
            .ok_or_else(|| not_found("Resume not found"))
    }
}

#[async_trait]
impl AnalyticsApi for FakeServer {
    async fn dashboard_summary(&self) -> Result<DashboardSummary, ApiError> {
        let state = self.state.lock().unwrap();
        let viewer = Self::current_user_id(&state)?;
        let job_ids = Self::visible_job_ids(&state, viewer);
        let (total, applied, shortlisted, rejected, average) =
            Self::summarize(&state, &job_ids);
        Ok(DashboardSummary {
            total_jobs: job_ids.len() as u64,
            total_applications: total,
            shortlisted,
            rejected,
            applied,
            average_match_score: average,
        })
    }

    async fn job_summary(&self, job_id: i64) -> Result<JobSummary, ApiError> {
        let state = self.state.lock().unwrap();
        Self::current_user_id(&state)?;
        if !state.jobs.iter().any(|row| row.job.id == job_id) {
            return Err(not_found("Job not found"));
        }
        let (total, applied, shortlisted, rejected, average) =
            Self::summarize(&state, &[job_id]);
        Ok(JobSummary {
            job_title: Self::job_title(&state, job_id),
            total_applications: total,
            shortlisted,
            rejected,
            applied,
            average_score: average,
        })
    }
}
