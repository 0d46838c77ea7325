//! CrediCheck Core
//!
//! This crate holds everything the CrediCheck front ends share: the wire
//! model of the verification service, the HTTP client that talks to it,
//! the submission/response state machine behind the UI, and the report
//! renderers.

pub mod client;
pub mod config;
pub mod models;
pub mod report;
pub mod session;

use thiserror::Error;

pub use client::{HttpVerifier, VerificationService};
pub use config::ClientConfig;
pub use models::{parse_response, Claim, Source, VerificationResult, VerifyRequest};
pub use report::{generate_report, ReportFormat, ReportView};
pub use session::{ErrorKind, Phase, Resolution, ResponseOrdering, Submission, SubmissionError, VerificationSession};

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    Schema(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<url::ParseError> for CoreError {
    fn from(err: url::ParseError) -> Self {
        CoreError::Config(format!("invalid URL: {}", err))
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Schema(err.to_string())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Default address of the verification service
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

/// Path of the verification route on the service
pub const VERIFY_PATH: &str = "/api/verify";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = CoreError::Status {
            status: 502,
            body: "bad gateway".to_string(),
        };
        assert_eq!(err.to_string(), "Service returned 502: bad gateway");
    }

    #[test]
    fn test_url_error_is_config() {
        let err: CoreError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, CoreError::Config(_)));
    }
}
