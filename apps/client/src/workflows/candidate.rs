//! Candidate dashboard orchestrator.
//!
//! Two selectable views (Jobs, My Applications) backed by independently
//! fetched collections, with every resume-dependent action gated on the
//! presence flag. State sits behind a mutex that is never held across an
//! await; each refresh captures a generation at issue time and applies its
//! result only if still current, so a stale response can never clobber a
//! fresher one.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use super::{detail_or, FetchGen};
use crate::api::CandidateApi;
use crate::models::{ApplicationSummary, Job, SkillGapReport};

const NO_RESUME_FOR_APPLY: &str = "Upload resume to enable Apply, Match Score & Skill Gap.";
const NO_RESUME_FOR_MATCH: &str = "Upload resume first.";
const SELECT_PDF: &str = "Select a PDF file.";
const UPLOAD_FAILED: &str = "Upload failed.";

/// The two tabs of the candidate dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CandidateView {
    #[default]
    Jobs,
    Applications,
}

#[derive(Default)]
struct CandidateState {
    view: CandidateView,
    jobs: Vec<Job>,
    applications: Vec<ApplicationSummary>,
    match_scores: HashMap<i64, u8>,
    skill_gaps: HashMap<i64, SkillGapReport>,
    has_resume: bool,
    message: Option<String>,
    jobs_gen: FetchGen,
    applications_gen: FetchGen,
    resume_gen: FetchGen,
}

pub struct CandidateDashboard {
    api: Arc<dyn CandidateApi>,
    state: Mutex<CandidateState>,
}

impl CandidateDashboard {
    pub fn new(api: Arc<dyn CandidateApi>) -> Self {
        Self {
            api,
            state: Mutex::new(CandidateState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, CandidateState> {
        self.state.lock().expect("candidate state poisoned")
    }

    fn set_message(&self, message: impl Into<String>) {
        self.lock().message = Some(message.into());
    }

    // ── Read accessors for the presentation layer ───────────────────────

    pub fn view(&self) -> CandidateView {
        self.lock().view
    }

    pub fn jobs(&self) -> Vec<Job> {
        self.lock().jobs.clone()
    }

    pub fn applications(&self) -> Vec<ApplicationSummary> {
        self.lock().applications.clone()
    }

    pub fn match_score(&self, job_id: i64) -> Option<u8> {
        self.lock().match_scores.get(&job_id).copied()
    }

    pub fn skill_gap(&self, job_id: i64) -> Option<SkillGapReport> {
        self.lock().skill_gaps.get(&job_id).cloned()
    }

    pub fn has_resume(&self) -> bool {
        self.lock().has_resume
    }

    /// Takes the transient message, clearing it — display-once semantics.
    pub fn take_message(&self) -> Option<String> {
        self.lock().message.take()
    }

    // ── Operations ──────────────────────────────────────────────────────

    /// Initial load on dashboard entry: jobs once, plus the resume probe
    /// that reconciles any stale presence flag.
    pub async fn enter(&self) {
        self.refresh_jobs().await;
        self.probe_resume().await;
    }

    /// Switching to My Applications always refetches — a recruiter can have
    /// changed statuses since the last visit. Switching to Jobs shows what
    /// is already loaded.
    pub async fn select_view(&self, view: CandidateView) {
        self.lock().view = view;
        if view == CandidateView::Applications {
            self.refresh_applications().await;
            self.refresh_jobs().await;
            self.probe_resume().await;
        }
    }

    pub async fn upload_resume(&self, file: Option<&Path>) {
        let Some(path) = file else {
            self.set_message(SELECT_PDF);
            return;
        };
        let is_pdf = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));
        if !is_pdf {
            self.set_message(SELECT_PDF);
            return;
        }

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("could not read {}: {e}", path.display());
                self.set_message(UPLOAD_FAILED);
                return;
            }
        };
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume.pdf")
            .to_string();

        match self.api.upload_resume(&filename, bytes.into()).await {
            Ok(message) => {
                // Optimistic: the upload acknowledgement itself is the
                // gating signal; the next probe reconciles.
                let mut state = self.lock();
                state.has_resume = true;
                state.message = Some(message);
            }
            Err(e) => {
                debug!("resume upload failed: {e}");
                self.set_message(UPLOAD_FAILED);
            }
        }
    }

    pub async fn apply(&self, job_id: i64) {
        if !self.has_resume() {
            self.set_message(NO_RESUME_FOR_APPLY);
            return;
        }
        match self.api.apply(job_id).await {
            Ok(message) => {
                self.set_message(message);
                // The refresh must land before the tab flips, or the
                // freshly opened view would render the pre-apply list.
                self.refresh_applications().await;
                self.lock().view = CandidateView::Applications;
            }
            Err(e) => self.set_message(detail_or(&e, "Cannot apply.")),
        }
    }

    pub async fn request_match_score(&self, job_id: i64) {
        if !self.has_resume() {
            self.set_message(NO_RESUME_FOR_MATCH);
            return;
        }
        match self.api.match_score(job_id).await {
            Ok(response) => {
                let percent = response.match_percentage.round().clamp(0.0, 100.0) as u8;
                self.lock().match_scores.insert(job_id, percent);
            }
            Err(e) => self.set_message(detail_or(&e, NO_RESUME_FOR_MATCH)),
        }
    }

    pub async fn request_skill_gap(&self, job_id: i64) {
        if !self.has_resume() {
            self.set_message(NO_RESUME_FOR_MATCH);
            return;
        }
        match self.api.skill_gap(job_id).await {
            Ok(report) => {
                self.lock().skill_gaps.insert(job_id, report);
            }
            Err(e) => self.set_message(detail_or(&e, NO_RESUME_FOR_MATCH)),
        }
    }

    // ── Refreshes ───────────────────────────────────────────────────────
    // Each one fully replaces its target collection; a response applies
    // only if no newer refresh of the same target was issued meanwhile.

    pub async fn refresh_applications(&self) {
        let issued = self.lock().applications_gen.begin();
        let result = self.api.my_applications().await;
        let mut state = self.lock();
        if !state.applications_gen.is_current(issued) {
            debug!(issued, "dropping superseded application list response");
            return;
        }
        match result {
            Ok(applications) => state.applications = applications,
            Err(e) => debug!("application refresh failed: {e}"),
        }
    }

    async fn refresh_jobs(&self) {
        let issued = self.lock().jobs_gen.begin();
        let result = self.api.list_jobs().await;
        let mut state = self.lock();
        if !state.jobs_gen.is_current(issued) {
            debug!(issued, "dropping superseded job list response");
            return;
        }
        match result {
            Ok(jobs) => state.jobs = jobs,
            Err(e) => debug!("job refresh failed: {e}"),
        }
    }

    async fn probe_resume(&self) {
        let issued = self.lock().resume_gen.begin();
        let result = self.api.resume_probe().await;
        let mut state = self.lock();
        if !state.resume_gen.is_current(issued) {
            return;
        }
        match result {
            Ok(info) => state.has_resume = info.is_some(),
            Err(e) => {
                debug!("resume probe failed: {e}");
                state.has_resume = false;
            }
        }
    }
}
