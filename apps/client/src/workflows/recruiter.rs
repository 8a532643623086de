//! Recruiter dashboard orchestrator.
//!
//! Owns the recruiter's job list, the create-job form, and the applicant
//! list for the currently selected job. Applicant fetches are keyed by the
//! selection they were issued for; a response whose job is no longer
//! selected (or that was superseded by a newer fetch for the same job) is
//! discarded, so rapid selection switches can never display another job's
//! applicants.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::{generic_or_session_loss, FetchGen};
use crate::api::RecruiterApi;
use crate::models::{Applicant, Job, JobDraft, ReviewDecision};

const TITLE_REQUIRED: &str = "Job title is required.";
const CREATE_FAILED: &str = "Error creating job.";
const RANK_FAILED: &str = "Ranking failed.";
const STATUS_FAILED: &str = "Status update failed.";
const NO_RESUME_ATTACHED: &str = "Resume not available";

/// Resume bytes materialized into a temp file. The backing file disappears
/// when the handle drops, so callers hold it exactly as long as a viewer
/// needs it and nothing leaks on early returns.
pub struct ResumeHandle {
    file: NamedTempFile,
}

impl ResumeHandle {
    fn materialize(bytes: &[u8]) -> std::io::Result<ResumeHandle> {
        let mut file = tempfile::Builder::new()
            .prefix("resume-")
            .suffix(".pdf")
            .tempfile()?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(ResumeHandle { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn save_as(&self, target: &Path) -> std::io::Result<()> {
        std::fs::copy(self.file.path(), target)?;
        Ok(())
    }
}

#[derive(Default)]
struct RecruiterState {
    jobs: Vec<Job>,
    draft: JobDraft,
    selected_job: Option<i64>,
    applicants: Vec<Applicant>,
    message: Option<String>,
    jobs_gen: FetchGen,
    applicants_gen: FetchGen,
}

pub struct RecruiterDashboard {
    api: Arc<dyn RecruiterApi>,
    state: Mutex<RecruiterState>,
}

impl RecruiterDashboard {
    pub fn new(api: Arc<dyn RecruiterApi>) -> Self {
        Self {
            api,
            state: Mutex::new(RecruiterState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RecruiterState> {
        self.state.lock().expect("recruiter state poisoned")
    }

    fn set_message(&self, message: impl Into<String>) {
        self.lock().message = Some(message.into());
    }

    // ── Read accessors for the presentation layer ───────────────────────

    pub fn jobs(&self) -> Vec<Job> {
        self.lock().jobs.clone()
    }

    pub fn selected_job(&self) -> Option<i64> {
        self.lock().selected_job
    }

    pub fn applicants(&self) -> Vec<Applicant> {
        self.lock().applicants.clone()
    }

    pub fn draft(&self) -> JobDraft {
        self.lock().draft.clone()
    }

    pub fn set_draft(&self, draft: JobDraft) {
        self.lock().draft = draft;
    }

    /// Takes the transient message, clearing it — display-once semantics.
    pub fn take_message(&self) -> Option<String> {
        self.lock().message.take()
    }

    // ── Operations ──────────────────────────────────────────────────────

    pub async fn enter(&self) {
        self.refresh_jobs().await;
    }

    pub async fn create_job(&self) {
        let draft = self.lock().draft.clone();
        if draft.title.trim().is_empty() {
            self.set_message(TITLE_REQUIRED);
            return;
        }
        match self.api.create_job(&draft).await {
            Ok(created) => {
                debug!(job_id = created.job_id, "job created");
                self.lock().draft = JobDraft::default();
                self.set_message("Job created successfully 🚀");
                self.refresh_jobs().await;
            }
            Err(e) => {
                debug!("job creation failed: {e}");
                self.set_message(generic_or_session_loss(&e, CREATE_FAILED));
            }
        }
    }

    /// Two-step remote operation: trigger the server-side re-rank, then
    /// fetch the post-rank list. Selection moves to `job_id` immediately and
    /// the displayed list is cleared, so a slow rank never leaves another
    /// job's applicants on screen.
    pub async fn rank(&self, job_id: i64) {
        {
            let mut state = self.lock();
            state.selected_job = Some(job_id);
            state.applicants.clear();
            // Invalidate any in-flight fetch for the previous selection.
            state.applicants_gen.begin();
        }
        match self.api.rank(job_id).await {
            Ok(outcome) => {
                debug!(
                    job = %outcome.job_title,
                    candidates = outcome.ranked_candidates.len(),
                    "ranking complete"
                );
                self.fetch_applicants(job_id).await;
                self.set_message("Candidates ranked successfully 🚀");
            }
            Err(e) => {
                debug!("ranking failed: {e}");
                self.set_message(generic_or_session_loss(&e, RANK_FAILED));
            }
        }
    }

    /// Revisit a previously ranked job without recomputing scores.
    pub async fn list_applications(&self, job_id: i64) {
        self.lock().selected_job = Some(job_id);
        self.fetch_applicants(job_id).await;
    }

    pub async fn update_status(&self, job_id: i64, user_id: i64, decision: ReviewDecision) {
        match self.api.update_status(job_id, user_id, decision).await {
            Ok(()) => {
                self.set_message("Status updated successfully");
                // Refetch-after-write: the displayed list must agree with
                // the server, not with a local guess.
                self.list_applications(job_id).await;
            }
            Err(e) => {
                debug!("status update failed: {e}");
                self.set_message(generic_or_session_loss(&e, STATUS_FAILED));
            }
        }
    }

    /// Stages the resume for viewing. A `None` id never reaches the network.
    pub async fn view_resume(&self, resume_id: Option<i64>) -> Option<ResumeHandle> {
        let Some(resume_id) = resume_id else {
            self.set_message(NO_RESUME_ATTACHED);
            return None;
        };
        match self.api.download_resume(resume_id).await {
            Ok(bytes) => match ResumeHandle::materialize(&bytes) {
                Ok(handle) => Some(handle),
                Err(e) => {
                    warn!("could not stage resume {resume_id}: {e}");
                    self.set_message("Unable to open resume");
                    None
                }
            },
            Err(e) => {
                debug!("resume fetch failed: {e}");
                self.set_message("Unable to open resume");
                None
            }
        }
    }

    /// Saves under the fixed name `resume.pdf` in `dir`. The intermediate
    /// handle is dropped on every path, success included.
    pub async fn download_resume(&self, resume_id: Option<i64>, dir: &Path) -> Option<PathBuf> {
        let Some(resume_id) = resume_id else {
            self.set_message(NO_RESUME_ATTACHED);
            return None;
        };
        match self.api.download_resume(resume_id).await {
            Ok(bytes) => {
                let staged = match ResumeHandle::materialize(&bytes) {
                    Ok(handle) => handle,
                    Err(e) => {
                        warn!("could not stage resume {resume_id}: {e}");
                        self.set_message("Download failed");
                        return None;
                    }
                };
                let target = dir.join("resume.pdf");
                match staged.save_as(&target) {
                    Ok(()) => Some(target),
                    Err(e) => {
                        warn!("could not save {}: {e}", target.display());
                        self.set_message("Download failed");
                        None
                    }
                }
            }
            Err(e) => {
                debug!("resume fetch failed: {e}");
                self.set_message("Download failed");
                None
            }
        }
    }

    // ── Refreshes ───────────────────────────────────────────────────────

    async fn refresh_jobs(&self) {
        let issued = self.lock().jobs_gen.begin();
        let result = self.api.my_jobs().await;
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

    /// Applies only if `job_id` is still the selection and no newer fetch
    /// was issued meanwhile.
    async fn fetch_applicants(&self, job_id: i64) {
        let issued = self.lock().applicants_gen.begin();
        let result = self.api.job_applications(job_id).await;
        let mut state = self.lock();
        if state.selected_job != Some(job_id) || !state.applicants_gen.is_current(issued) {
            debug!(job_id, "dropping applicant list for superseded selection");
            return;
        }
        match result {
            Ok(applicants) => state.applicants = applicants,
            Err(e) => debug!("applicant fetch failed: {e}"),
        }
    }
}
