use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::NaiveDateTime;
use reqwest::multipart;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use super::{AnalyticsApi, ApiError, AuthApi, CandidateApi, RecruiterApi};
use crate::models::{
    Applicant, ApplicationSummary, DashboardSummary, Job, JobCreated, JobDraft, JobSummary,
    LoginResponse, MatchResponse, RankOutcome, RegisterRequest, ResumeInfo, ReviewDecision,
    SkillGapReport,
};
use crate::session::store::SessionStore;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error body shape the server uses for every rejection.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Acknowledgement body for write endpoints that answer with a message.
#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

/// The `reqwest`-backed implementation of the API capability traits.
///
/// The session store is consulted per request, so a login or logout between
/// two calls is picked up without rebuilding the client.
pub struct HttpApi {
    client: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl HttpApi {
    pub fn new(base_url: String, session: Arc<SessionStore>) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Every authenticated call goes through here so the bearer token is
    /// attached in exactly one place.
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut builder = self.client.request(method, self.url(path));
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn send_ack(&self, builder: RequestBuilder) -> Result<String, ApiError> {
        let body: MessageBody = self.send_json(builder).await?;
        Ok(body.message)
    }
}

/// Maps non-success statuses onto the error taxonomy, pulling the server's
/// `detail` field out of the body when it parses.
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    let detail = parse_detail(&body);
    debug!(status = status.as_u16(), ?detail, "request rejected");
    if status == StatusCode::UNAUTHORIZED {
        return Err(ApiError::Unauthorized { detail });
    }
    Err(ApiError::Status {
        status: status.as_u16(),
        detail,
    })
}

fn parse_detail(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body).map(|e| e.detail).ok()
}

#[async_trait]
impl AuthApi for HttpApi {
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        // OAuth2 password form: the server reads `username`/`password` fields.
        let form = [("username", email), ("password", password)];
        let builder = self.client.post(self.url("/login")).form(&form);
        self.send_json(builder).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.url("/register"))
            .json(request)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

#[async_trait]
impl CandidateApi for HttpApi {
    async fn resume_probe(&self) -> Result<Option<ResumeInfo>, ApiError> {
        // Absence is signalled in-band: 200 with a message body and no
        // `resume_id` field.
        #[derive(Deserialize)]
        struct ProbeBody {
            resume_id: Option<i64>,
            uploaded_at: Option<NaiveDateTime>,
        }

        let body: ProbeBody = self
            .send_json(self.request(Method::GET, "/my-resume"))
            .await?;
        Ok(match (body.resume_id, body.uploaded_at) {
            (Some(resume_id), Some(uploaded_at)) => Some(ResumeInfo {
                resume_id,
                uploaded_at,
            }),
            _ => None,
        })
    }

    async fn upload_resume(&self, filename: &str, bytes: Bytes) -> Result<String, ApiError> {
        let part = multipart::Part::stream(bytes)
            .file_name(filename.to_string())
            .mime_str("application/pdf")?;
        let form = multipart::Form::new().part("file", part);
        self.send_ack(self.request(Method::POST, "/upload-resume").multipart(form))
            .await
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, ApiError> {
        self.send_json(self.request(Method::GET, "/jobs")).await
    }

    async fn my_applications(&self) -> Result<Vec<ApplicationSummary>, ApiError> {
        self.send_json(self.request(Method::GET, "/my-applications"))
            .await
    }

    async fn apply(&self, job_id: i64) -> Result<String, ApiError> {
        self.send_ack(self.request(Method::POST, &format!("/apply/{job_id}")))
            .await
    }

    async fn match_score(&self, job_id: i64) -> Result<MatchResponse, ApiError> {
        self.send_json(self.request(Method::POST, &format!("/match/{job_id}")))
            .await
    }

    async fn skill_gap(&self, job_id: i64) -> Result<SkillGapReport, ApiError> {
        self.send_json(self.request(Method::POST, &format!("/skill-gap/{job_id}")))
            .await
    }
}

#[async_trait]
impl RecruiterApi for HttpApi {
    async fn my_jobs(&self) -> Result<Vec<Job>, ApiError> {
        self.send_json(self.request(Method::GET, "/my-jobs")).await
    }

    async fn create_job(&self, draft: &JobDraft) -> Result<JobCreated, ApiError> {
        // The server takes these as query parameters, not a JSON body.
        let builder = self.request(Method::POST, "/create-job").query(&[
            ("title", draft.title.as_str()),
            ("description", draft.description.as_str()),
            ("required_skills", draft.required_skills.as_str()),
        ]);
        self.send_json(builder).await
    }

    async fn rank(&self, job_id: i64) -> Result<RankOutcome, ApiError> {
        self.send_json(self.request(Method::POST, &format!("/rank/{job_id}")))
            .await
    }

    async fn job_applications(&self, job_id: i64) -> Result<Vec<Applicant>, ApiError> {
        self.send_json(self.request(Method::GET, &format!("/job-applications/{job_id}")))
            .await
    }

    async fn update_status(
        &self,
        job_id: i64,
        user_id: i64,
        decision: ReviewDecision,
    ) -> Result<(), ApiError> {
        let response = self
            .request(Method::POST, &format!("/update-status/{job_id}/{user_id}"))
            .json(&json!({ "status": decision.as_str() }))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn download_resume(&self, resume_id: i64) -> Result<Bytes, ApiError> {
        let response = self
            .request(Method::GET, &format!("/download-resume/{resume_id}"))
            .send()
            .await?;
        let response = check_status(response).await?;
        Ok(response.bytes().await?)
    }
}

#[async_trait]
impl AnalyticsApi for HttpApi {
    async fn dashboard_summary(&self) -> Result<DashboardSummary, ApiError> {
        self.send_json(self.request(Method::GET, "/dashboard-analytics"))
            .await
    }

    async fn job_summary(&self, job_id: i64) -> Result<JobSummary, ApiError> {
        self.send_json(self.request(Method::GET, &format!("/job-analytics/{job_id}")))
            .await
    }
}
