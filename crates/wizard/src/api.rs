//! Client for the scaffolding service.
//!
//! The wizard talks to the service through the [`ScaffoldApi`] trait so the
//! controller can be driven by an in-memory fake in tests. [`HttpScaffoldApi`]
//! is the `reqwest` implementation.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use studio_ir::GenerationRequest;
use thiserror::Error;

use crate::config::ApiConfig;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("timeout")]
    Timeout,
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("not authorized")]
    Unauthorized,
    #[error("json error: {0}")]
    Serde(String),
    #[error("generation job {job_id} failed: {message}")]
    JobFailed { job_id: String, message: String },
}

impl ApiError {
    /// Returns true if the error is transient and the request may be repeated.
    pub fn should_retry(&self) -> bool {
        match self {
            Self::Transport(_) | Self::Timeout => true,
            Self::Http { status, .. } => *status == 429 || (500..=599).contains(status),
            _ => false,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// ============================================================================
// Wire types
// ============================================================================

/// Choices offered for one technology, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnologyOptions {
    pub architectures: Vec<String>,
    pub design_patterns: Vec<String>,
    pub databases: Vec<String>,
}

/// Identifier of a submitted generation job
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartGenerationResponse {
    job_id: JobId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Pending,
    Running,
    Completed,
    Failed,
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobState::Completed | JobState::Failed)
    }
}

/// Progress of a generation job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    pub status: JobState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobStatus {
    pub fn pending() -> Self {
        Self {
            status: JobState::Pending,
            download_url: None,
            error: None,
        }
    }

    pub fn completed(download_url: impl Into<String>) -> Self {
        Self {
            status: JobState::Completed,
            download_url: Some(download_url.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            status: JobState::Failed,
            download_url: None,
            error: Some(error.into()),
        }
    }
}

// ============================================================================
// ScaffoldApi
// ============================================================================

#[async_trait]
pub trait ScaffoldApi: Send + Sync {
    /// `GET /api/technologies`
    async fn technologies(&self) -> ApiResult<Vec<String>>;

    /// `GET /api/technologies/{technology}/options`
    async fn options(&self, technology: &str) -> ApiResult<TechnologyOptions>;

    /// `POST /api/generate`
    async fn start_generation(&self, request: &GenerationRequest) -> ApiResult<JobId>;

    /// `GET /api/generate/{job_id}/status`
    async fn job_status(&self, job_id: &JobId) -> ApiResult<JobStatus>;
}

/// Poll `job_id` until it completes, fails, or `max_attempts` polls pass.
///
/// Returns the download URL of a completed job.
pub async fn wait_for_job(
    api: &dyn ScaffoldApi,
    job_id: &JobId,
    poll_interval: Duration,
    max_attempts: u32,
) -> ApiResult<String> {
    for attempt in 1..=max_attempts {
        let status = api.job_status(job_id).await?;
        tracing::debug!("Job {} status {:?} (poll {})", job_id, status.status, attempt);
        match status.status {
            JobState::Completed => {
                return status.download_url.ok_or_else(|| {
                    ApiError::Serde(format!("job {} completed without a download URL", job_id))
                });
            }
            JobState::Failed => {
                return Err(ApiError::JobFailed {
                    job_id: job_id.to_string(),
                    message: status.error.unwrap_or_else(|| "unknown error".to_string()),
                });
            }
            JobState::Pending | JobState::Running => {
                if attempt < max_attempts {
                    tokio::time::sleep(poll_interval).await;
                }
            }
        }
    }
    tracing::warn!("Job {} still running after {} polls", job_id, max_attempts);
    Err(ApiError::Timeout)
}

// ============================================================================
// HttpScaffoldApi
// ============================================================================

#[derive(Debug, Clone)]
pub struct HttpScaffoldApi {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpScaffoldApi {
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("scaffold-studio/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{}", self.base_url, path)
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn read_json<T: for<'de> Deserialize<'de>>(res: reqwest::Response) -> ApiResult<T> {
        match res.status() {
            s if s.is_success() => res
                .json::<T>()
                .await
                .map_err(|e| ApiError::Serde(e.to_string())),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ApiError::Unauthorized),
            s => {
                let status = s.as_u16();
                let body = res.text().await.unwrap_or_default();
                tracing::warn!("Scaffold API returned {}: {}", status, body);
                Err(ApiError::Http { status, body })
            }
        }
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(&self, path: &str) -> ApiResult<T> {
        let res = self
            .authorize(self.http.get(self.url(path)))
            .send()
            .await
            .map_err(map_reqwest_error)?;
        Self::read_json(res).await
    }
}

#[async_trait]
impl ScaffoldApi for HttpScaffoldApi {
    async fn technologies(&self) -> ApiResult<Vec<String>> {
        self.get_json("technologies").await
    }

    async fn options(&self, technology: &str) -> ApiResult<TechnologyOptions> {
        self.get_json(&options_path(technology)).await
    }

    async fn start_generation(&self, request: &GenerationRequest) -> ApiResult<JobId> {
        let res = self
            .authorize(self.http.post(self.url("generate")))
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let started: StartGenerationResponse = Self::read_json(res).await?;
        tracing::info!("Generation job {} started", started.job_id);
        Ok(started.job_id)
    }

    async fn job_status(&self, job_id: &JobId) -> ApiResult<JobStatus> {
        self.get_json(&status_path(job_id)).await
    }
}

fn map_reqwest_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Transport(e.to_string())
    }
}

fn options_path(technology: &str) -> String {
    format!("technologies/{}/options", urlencoding::encode(technology))
}

fn status_path(job_id: &JobId) -> String {
    format!("generate/{}/status", urlencoding::encode(&job_id.0))
}
