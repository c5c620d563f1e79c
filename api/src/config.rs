//! Analysis service location.
//!
//! The base URL is the only configurable value. Resolution order:
//! 1. `BLOODREPORT_API_URL` read at runtime (native targets only),
//! 2. `BLOODREPORT_API_URL` captured at build time (the only option on wasm32),
//! 3. [`DEFAULT_BASE_URL`].

use reqwest::Url;

use crate::error::ApiError;

/// Environment variable holding the analysis service base URL.
pub const BASE_URL_ENV: &str = "BLOODREPORT_API_URL";

/// Documented fallback when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

const UPLOAD_PATH: &str = "/api/blood-report/upload";
const HEALTH_PATH: &str = "/api/blood-report/health";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl ApiConfig {
    /// Build a config from an explicit base URL.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ApiError> {
        let raw = base_url.as_ref().trim();
        Url::parse(raw).map_err(|err| ApiError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: err.to_string(),
        })?;

        Ok(Self {
            base_url: raw.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve the base URL from the environment, falling back to [`DEFAULT_BASE_URL`].
    ///
    /// An unparsable value is logged and ignored rather than failing startup.
    pub fn from_env() -> Self {
        Self::resolve(runtime_override(), option_env!("BLOODREPORT_API_URL"))
    }

    fn resolve(runtime: Option<String>, build_time: Option<&str>) -> Self {
        let candidate = runtime
            .filter(|value| !value.trim().is_empty())
            .or_else(|| {
                build_time
                    .filter(|value| !value.trim().is_empty())
                    .map(str::to_string)
            });

        match candidate {
            Some(value) => Self::new(&value).unwrap_or_else(|err| {
                tracing::warn!(target: "bloodreport::api", %err, "falling back to {DEFAULT_BASE_URL}");
                Self::default()
            }),
            None => Self::default(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST` target for report uploads.
    pub fn upload_url(&self) -> String {
        format!("{}{UPLOAD_PATH}", self.base_url)
    }

    /// `GET` target for the liveness probe.
    pub fn health_url(&self) -> String {
        format!("{}{HEALTH_PATH}", self.base_url)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn runtime_override() -> Option<String> {
    std::env::var(BASE_URL_ENV).ok()
}

#[cfg(target_arch = "wasm32")]
fn runtime_override() -> Option<String> {
    None
}
