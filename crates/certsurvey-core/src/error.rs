use std::path::PathBuf;

use thiserror::Error;

/// Fixed message recorded for any property whose value is not a usable certificate.
pub const CERT_DECODE_FAILED: &str = "failed to decode certificate";

/// Failure that ends the survey as a whole. Only raised when a collaborator
/// outside the survey (the apply spec) cannot be consulted.
#[derive(Debug, Error)]
pub enum SurveyError {
    #[error("getting apply spec failed: {0}")]
    ApplySpec(String),
}

/// Job-scoped failure. Recorded in the job's `error_string`, never propagated.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum JobError {
    #[error("{} not found", .path.display())]
    NotFound { path: PathBuf },
    #[error("Unmarshaling {format} for {} file failed: {message}", .path.display())]
    Unmarshal {
        format: &'static str,
        path: PathBuf,
        message: String,
    },
}

/// Property-scoped failure. The display text is fixed; `detail` carries the
/// decoder diagnostic for logs.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("failed to decode certificate")]
pub struct CertDecodeError {
    pub detail: String,
}

impl CertDecodeError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self { detail: detail.into() }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    #[error("not supported")]
    NotSupported,
}
