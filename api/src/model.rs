//! Wire model shared with the analysis service.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Parsed body of a successful analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Markdown snippets, in the order the service ranked them.
    pub risk_factors: Vec<String>,
    /// Markdown snippets.
    pub lifestyle_advice: Vec<String>,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_warnings: Vec<String>,
}

/// A single lab value with its normal reference band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_normal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_normal: Option<f64>,
    #[serde(default)]
    pub status: MetricStatus,
}

impl Metric {
    /// Lower bound of the reference band, `0` when the service sent none.
    pub fn band_min(&self) -> f64 {
        self.min_normal.unwrap_or(0.0)
    }

    /// Upper bound of the reference band, `0` when the service sent none.
    pub fn band_max(&self) -> f64 {
        self.max_normal.unwrap_or(0.0)
    }
}

/// Clinical status the service derived for a metric.
///
/// Unrecognized labels are kept verbatim in [`MetricStatus::Other`] so a result
/// round-trips unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MetricStatus {
    Normal,
    Low,
    High,
    Critical,
    #[default]
    Unknown,
    Other(String),
}

impl MetricStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Normal => "normal",
            Self::Low => "low",
            Self::High => "high",
            Self::Critical => "critical",
            Self::Unknown => "unknown",
            Self::Other(label) => label,
        }
    }
}

impl From<String> for MetricStatus {
    fn from(label: String) -> Self {
        match label.as_str() {
            "normal" => Self::Normal,
            "low" => Self::Low,
            "high" => Self::High,
            "critical" => Self::Critical,
            "unknown" => Self::Unknown,
            _ => Self::Other(label),
        }
    }
}

impl From<&str> for MetricStatus {
    fn from(label: &str) -> Self {
        Self::from(label.to_string())
    }
}

impl From<MetricStatus> for String {
    fn from(status: MetricStatus) -> Self {
        match status {
            MetricStatus::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for MetricStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error payload returned with non-2xx statuses. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    /// Seconds until the rate limit window reopens (sent with 429).
    #[serde(default)]
    pub retry_after: Option<u64>,
}

impl ErrorBody {
    /// Lenient parse: anything that isn't a JSON object yields an empty body.
    pub fn parse(raw: &[u8]) -> Self {
        serde_json::from_slice(raw).unwrap_or_default()
    }
}

/// Liveness payload from the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

/// A report picked by the user, ready to be sent as multipart form data.
#[derive(Clone, PartialEq, Eq)]
pub struct ReportFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ReportFile {
    /// Build a file whose MIME type is inferred from its extension.
    pub fn from_name(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime = mime_for_name(&name).to_string();
        Self { name, mime, bytes }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Lowercased extension, if the name has one.
    pub fn extension(&self) -> Option<String> {
        extension_of(&self.name)
    }
}

impl fmt::Debug for ReportFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportFile")
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("size", &self.bytes.len())
            .finish()
    }
}

fn extension_of(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// MIME type for the report formats the service understands.
pub fn mime_for_name(name: &str) -> &'static str {
    match extension_of(name).as_deref() {
        Some("pdf") => "application/pdf",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_service_payload() {
        let payload = json!({
            "riskFactors": ["r1"],
            "lifestyleAdvice": ["a1"],
            "metrics": [
                {"name": "Glucose", "value": 95, "unit": "mg/dL", "minNormal": 70, "maxNormal": 100, "status": "normal"},
                {"name": "Ferritin", "value": 8.5, "unit": "ng/mL", "status": "borderline"}
            ],
            "validationWarnings": ["Check units"]
        });

        let result: AnalysisResult = serde_json::from_value(payload).unwrap();
        assert_eq!(result.metrics.len(), 2);
        assert_eq!(result.metrics[0].status, MetricStatus::Normal);
        assert_eq!(result.metrics[0].band_max(), 100.0);
        assert_eq!(
            result.metrics[1].status,
            MetricStatus::Other("borderline".into())
        );
        assert_eq!(result.metrics[1].band_min(), 0.0);
        assert_eq!(result.validation_warnings, vec!["Check units".to_string()]);
    }

    #[test]
    fn unrecognized_status_round_trips() {
        let metric = Metric {
            name: "X".into(),
            value: 1.0,
            unit: "u".into(),
            min_normal: None,
            max_normal: None,
            status: MetricStatus::from("unrecognized-string"),
        };
        let encoded = serde_json::to_value(&metric).unwrap();
        assert_eq!(encoded["status"], "unrecognized-string");
        assert!(encoded.get("minNormal").is_none());
    }

    #[test]
    fn missing_status_is_unknown() {
        let metric: Metric =
            serde_json::from_value(json!({"name": "Test", "value": 10, "unit": "u"})).unwrap();
        assert_eq!(metric.status, MetricStatus::Unknown);
    }

    #[test]
    fn error_body_is_lenient() {
        assert_eq!(ErrorBody::parse(b"<html>oops</html>"), ErrorBody::default());
        let body = ErrorBody::parse(br#"{"error":"Too many requests","message":"slow down","retryAfter":42}"#);
        assert_eq!(body.message.as_deref(), Some("slow down"));
        assert_eq!(body.retry_after, Some(42));
    }

    #[test]
    fn mime_follows_extension() {
        assert_eq!(ReportFile::from_name("labs.PDF", vec![]).mime, "application/pdf");
        assert_eq!(ReportFile::from_name("scan.jpeg", vec![]).mime, "image/jpeg");
        assert_eq!(ReportFile::from_name("scan.png", vec![]).mime, "image/png");
        assert_eq!(
            ReportFile::from_name("notes", vec![]).mime,
            "application/octet-stream"
        );
        assert_eq!(ReportFile::from_name(".pdf", vec![]).extension(), None);
    }
}
