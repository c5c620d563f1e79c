use std::fmt;

/// Why an attempt ended in the Failed phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// `submit()` without a selected file. Never reaches the network.
    NoFileSelected,
    /// The request produced no response.
    ConnectionFailed,
    /// 409: the service is already analyzing a report.
    Conflict,
    /// 429.
    RateLimited,
    /// Any other non-2xx status, or a 2xx body that could not be read.
    AnalysisRejected,
}

impl ErrorKind {
    pub fn default_message(self) -> &'static str {
        match self {
            Self::NoFileSelected => "Please select a file first!",
            Self::ConnectionFailed => {
                "Failed to connect to the server. Make sure the backend is running!"
            }
            Self::Conflict => "An upload is already in progress. Please wait.",
            Self::RateLimited => "Rate limit exceeded. Please try again later.",
            Self::AnalysisRejected => "Failed to analyze the report",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoFileSelected => "no-file-selected",
            Self::ConnectionFailed => "connection-failed",
            Self::Conflict => "conflict",
            Self::RateLimited => "rate-limited",
            Self::AnalysisRejected => "analysis-rejected",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified failure: kind tag plus the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct UploadError {
    pub kind: ErrorKind,
    pub message: String,
    /// Advice from a 429 body. Informational only; nothing retries automatically.
    pub retry_after_secs: Option<u64>,
}

impl UploadError {
    /// Error carrying the kind's default message.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: kind.default_message().to_string(),
            retry_after_secs: None,
        }
    }

    /// Error using `message` when it has content, else the kind's default.
    pub fn with_message(kind: ErrorKind, message: Option<&str>) -> Self {
        let message = message
            .filter(|text| !text.trim().is_empty())
            .unwrap_or(kind.default_message());
        Self {
            kind,
            message: message.to_string(),
            retry_after_secs: None,
        }
    }

    pub fn retry_after(mut self, secs: Option<u64>) -> Self {
        self.retry_after_secs = secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_message_is_kept_as_sent() {
        let err = UploadError::with_message(ErrorKind::Conflict, Some("  busy, try later \n"));
        assert_eq!(err.message, "  busy, try later \n");
    }

    #[test]
    fn blank_message_falls_back_to_default() {
        let err = UploadError::with_message(ErrorKind::RateLimited, Some(" \t "));
        assert_eq!(err.message, "Rate limit exceeded. Please try again later.");
        assert_eq!(
            UploadError::with_message(ErrorKind::AnalysisRejected, None).message,
            "Failed to analyze the report"
        );
    }
}
