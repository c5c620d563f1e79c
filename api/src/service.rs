//! Transport seam between the analyzer and the remote analysis service.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::model::{HealthStatus, ReportFile};

/// Raw outcome of an upload that reached the service.
///
/// Status classification happens in the caller so the decision table lives in
/// one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ServiceResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can run a report analysis.
///
/// Futures are `?Send`: the analyzer drives them from a single-threaded UI loop.
#[async_trait(?Send)]
pub trait AnalysisService {
    type Error: std::error::Error + 'static;

    /// Send one report. `Err` means no response was received at all; a status
    /// whose body could not be read comes back with an empty body.
    async fn upload(&self, file: &ReportFile) -> Result<ServiceResponse, Self::Error>;

    /// Probe service liveness.
    async fn health(&self) -> Result<HealthStatus, Self::Error>;
}

/// `reqwest`-backed client for the analysis REST API.
#[derive(Debug, Clone)]
pub struct HttpAnalysisService {
    client: Client,
    config: ApiConfig,
}

impl HttpAnalysisService {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }
}

#[async_trait(?Send)]
impl AnalysisService for HttpAnalysisService {
    type Error = ApiError;

    async fn upload(&self, file: &ReportFile) -> Result<ServiceResponse, ApiError> {
        let url = self.config.upload_url();
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime)?;
        let form = Form::new().part("file", part);

        tracing::debug!(
            target: "bloodreport::api",
            %url,
            file = %file.name,
            size = file.size(),
            "uploading report"
        );

        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status().as_u16();
        // The status stands even when the body cannot be read.
        let body = match response.bytes().await {
            Ok(body) => body.to_vec(),
            Err(err) => {
                tracing::warn!(target: "bloodreport::api", status, %err, "response body unreadable");
                Vec::new()
            }
        };

        tracing::debug!(target: "bloodreport::api", status, bytes = body.len(), "upload answered");
        Ok(ServiceResponse { status, body })
    }

    async fn health(&self) -> Result<HealthStatus, ApiError> {
        let url = self.config.health_url();
        let body = self.client.get(&url).send().await?.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
