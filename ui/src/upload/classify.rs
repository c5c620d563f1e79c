//! Response-status decision table.

use api::{AnalysisResult, ErrorBody, ServiceResponse};

use super::error::{ErrorKind, UploadError};

const UNREADABLE_RESULT: &str = "The analysis service returned an unreadable result.";

/// Map a received response to the analysis result or a classified error.
///
/// | status | outcome | message source |
/// |--------|---------|----------------|
/// | 2xx    | result  | body |
/// | 409    | `Conflict` | `message` |
/// | 429    | `RateLimited` | `message` (+ `retryAfter`) |
/// | other  | `AnalysisRejected` | `error` |
pub fn classify_response(response: &ServiceResponse) -> Result<AnalysisResult, UploadError> {
    if response.is_success() {
        return serde_json::from_slice(&response.body).map_err(|err| {
            tracing::warn!(target: "bloodreport::upload", %err, "undecodable analysis result");
            UploadError::with_message(ErrorKind::AnalysisRejected, Some(UNREADABLE_RESULT))
        });
    }

    let body = ErrorBody::parse(&response.body);
    Err(match response.status {
        409 => UploadError::with_message(ErrorKind::Conflict, body.message.as_deref()),
        429 => UploadError::with_message(ErrorKind::RateLimited, body.message.as_deref())
            .retry_after(body.retry_after),
        _ => UploadError::with_message(ErrorKind::AnalysisRejected, body.error.as_deref()),
    })
}
