//! The single point of contact with the remote analysis service.
//!
//! Uploads queued candidate documents plus the job description and parses the
//! response envelope. Result contents are not validated here; missing or malformed
//! fields are defaulted when the batch is stored.
//!
//! No retries and no implicit timeout: callers that want a deadline pass one to
//! `AnalysisClient::new`.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, Url,
};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::ScreenError;
use crate::models::{lenient, AnalysisResult, CandidateFile};

pub const DEFAULT_API_BASE: &str = "http://localhost:5000";

const UPLOAD_PATH: &str = "/upload";
const HEALTH_PATH: &str = "/health";
const FILES_FIELD: &str = "files[]";
const JD_TEXT_FIELD: &str = "jd_text";
const JD_FILE_FIELD: &str = "jd_file";

/// Everything sent in one submission. A snapshot: later queue edits do not affect it.
#[derive(Debug, Clone, Default)]
pub struct SubmissionRequest {
    pub files: Vec<CandidateFile>,
    pub jd_text: Option<String>,
    pub jd_file: Option<CandidateFile>,
}

/// A successfully parsed submission response.
#[derive(Debug, Clone)]
pub struct AnalysisBatch {
    pub results: Vec<AnalysisResult>,
    pub total_count: usize,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    results: Option<Vec<AnalysisResult>>,
    #[serde(default, deserialize_with = "lenient::integer")]
    total_resumes: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    #[serde(default, deserialize_with = "lenient::text")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    #[serde(default)]
    ok: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Reachable,
    /// A response arrived but did not report `ok`.
    Unhealthy,
    Unreachable,
}

impl HealthStatus {
    pub fn message(&self) -> &'static str {
        match self {
            HealthStatus::Reachable => "Backend reachable",
            HealthStatus::Unhealthy => "Response received but not OK",
            HealthStatus::Unreachable => "Could not reach backend",
        }
    }
}

/// The submission seam. The workspace only talks to this trait, so tests can drive it
/// with an in-process stub.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn submit(&self, request: &SubmissionRequest) -> Result<AnalysisBatch, ScreenError>;
}

#[derive(Debug, Clone)]
pub struct AnalysisClient {
    client: Client,
    base_url: String,
}

impl AnalysisClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ScreenError> {
        let base_url = normalize_base_url(base_url)?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Probes `GET /health`. Never fails: unreachable is a status, not an error.
    pub async fn health(&self) -> HealthStatus {
        let url = self.endpoint(HEALTH_PATH);
        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("Health probe to {url} failed: {e}");
                return HealthStatus::Unreachable;
            }
        };
        match response.json::<HealthResponse>().await {
            Ok(HealthResponse { ok: true }) => HealthStatus::Reachable,
            Ok(_) => HealthStatus::Unhealthy,
            Err(e) => {
                warn!("Health probe to {url} returned an unreadable body: {e}");
                HealthStatus::Unreachable
            }
        }
    }
}

#[async_trait]
impl AnalysisService for AnalysisClient {
    async fn submit(&self, request: &SubmissionRequest) -> Result<AnalysisBatch, ScreenError> {
        let form = build_form(request).await?;
        let url = self.endpoint(UPLOAD_PATH);
        debug!(
            "Submitting {} file(s) to {url} (jd_text={}, jd_file={})",
            request.files.len(),
            request.jd_text.is_some(),
            request.jd_file.is_some()
        );

        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ServiceErrorBody>(&body)
                .ok()
                .and_then(|b| b.error);
            warn!("Analysis service returned {status}: {body}");
            return Err(ScreenError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: UploadResponse = serde_json::from_str(&body)?;
        let results = envelope.results.unwrap_or_default();
        let total_count = envelope
            .total_resumes
            .map(|n| n as usize)
            .unwrap_or(results.len());
        debug!("Analysis returned {} result(s)", results.len());

        Ok(AnalysisBatch {
            results,
            total_count,
        })
    }
}

async fn build_form(request: &SubmissionRequest) -> Result<Form, ScreenError> {
    let mut form = Form::new();
    for file in &request.files {
        form = form.part(FILES_FIELD, file_part(file).await?);
    }
    if let Some(text) = request
        .jd_text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
    {
        form = form.text(JD_TEXT_FIELD, text.to_string());
    }
    if let Some(jd_file) = &request.jd_file {
        form = form.part(JD_FILE_FIELD, file_part(jd_file).await?);
    }
    Ok(form)
}

async fn file_part(file: &CandidateFile) -> Result<Part, ScreenError> {
    let content = file.read().await?;
    Ok(Part::bytes(content.to_vec()).file_name(file.name.clone()))
}

/// Trims whitespace and trailing slashes, and checks the result is an http(s) URL.
pub fn normalize_base_url(raw: &str) -> Result<String, ScreenError> {
    let trimmed = raw.trim().trim_end_matches('/');
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(trimmed.to_string()),
        _ => Err(ScreenError::InvalidBaseUrl(raw.trim().to_string())),
    }
}
