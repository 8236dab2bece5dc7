use std::time::Duration;
use thiserror::Error;

const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

fn format_timeout(timeout: &Duration) -> humantime::FormattedDuration {
    humantime::format_duration(*timeout)
}

/// Failures of a single upload-and-analyze attempt.
///
/// Every kind ends the attempt; nothing is retried automatically. None of
/// them is fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyzeError {
    #[error("{name} is not a PDF (got {mime})")]
    InvalidFileType { name: String, mime: String },

    #[error("no file selected")]
    NoFileSelected,

    #[error("analysis request timed out after {}", format_timeout(.0))]
    RequestTimeout(Duration),

    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),

    #[error("server returned {status}: {detail}")]
    ServerReportedError { status: u16, detail: String },

    #[error("analysis failed: {0}")]
    UnknownFailure(String),
}

impl AnalyzeError {
    /// Short heading shown to the user
    pub fn title(&self) -> &'static str {
        match self {
            AnalyzeError::InvalidFileType { .. } => "Invalid file type",
            AnalyzeError::NoFileSelected => "No file selected",
            _ => "Analysis failed",
        }
    }

    /// Message shown to the user. Server details are passed through verbatim;
    /// unknown failures never leak their internal cause.
    pub fn user_message(&self) -> &str {
        match self {
            AnalyzeError::InvalidFileType { .. } => "Please select a PDF file.",
            AnalyzeError::NoFileSelected => "Please select a PDF resume first.",
            AnalyzeError::RequestTimeout(_) => "Analysis took too long. Please try again.",
            AnalyzeError::NetworkUnavailable(_) => {
                "No internet connection. Please check your connection."
            }
            AnalyzeError::ServerReportedError { detail, .. } => detail,
            AnalyzeError::UnknownFailure(_) => GENERIC_FAILURE,
        }
    }

    /// Input problems are fixed locally; everything else can be retried as is.
    pub fn is_retryable(&self) -> bool {
        !self.is_input_error()
    }

    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AnalyzeError::InvalidFileType { .. } | AnalyzeError::NoFileSelected
        )
    }

    /// Build the error for a non-2xx response. A blank or missing detail
    /// falls back to the generic failure.
    pub fn from_status(status: u16, detail: Option<&str>) -> Self {
        match detail.map(str::trim).filter(|d| !d.is_empty()) {
            Some(detail) => AnalyzeError::ServerReportedError {
                status,
                detail: detail.to_string(),
            },
            None => AnalyzeError::UnknownFailure(format!("HTTP {} without detail", status)),
        }
    }
}
