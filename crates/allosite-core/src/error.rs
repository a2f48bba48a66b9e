use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

pub type Result<T, E = PredictError> = std::result::Result<T, E>;

/// Failure modes of the prediction pipeline. Every stage maps its faults
/// onto one of these kinds and the caller propagates them unchanged; there
/// is no local recovery or partial-result mode anywhere.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("required input not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to decode {artifact} artifact: {reason}")]
    Corrupt {
        artifact: &'static str,
        reason: String,
    },
    #[error("{0}")]
    Invalid(String),
    #[error("malformed record: {0}")]
    Format(String),
    #[error("dimension mismatch: expected {expected} features, got {actual}")]
    Dimension { expected: usize, actual: usize },
    #[error("pocket detection tool exited with {status}")]
    ExternalTool { status: ExitStatus },
    #[error("no atomic coordinates to average")]
    EmptyGeometry,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
