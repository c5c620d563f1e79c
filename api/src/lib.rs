//! Client side of the blood report analysis service: wire model, configuration
//! and the HTTP transport used by the analyzer UI.

pub mod config;
pub mod error;
pub mod model;
pub mod service;

pub use config::ApiConfig;
pub use error::ApiError;
pub use model::{AnalysisResult, ErrorBody, HealthStatus, Metric, MetricStatus, ReportFile};
pub use service::{AnalysisService, HttpAnalysisService, ServiceResponse};
