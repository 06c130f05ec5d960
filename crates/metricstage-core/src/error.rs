//! Shared error type across metricstage crates.

use std::path::PathBuf;

use thiserror::Error;

/// Error kinds (stable API, used by callers deciding retry/skip).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Filesystem failure: missing or unwritable directory, unreadable entry.
    Io,
    /// Metric file does not exist.
    NotFound,
    /// Document is not well-formed YAML.
    Parse,
    /// Required field absent.
    MissingField,
    /// Field present but with the wrong shape.
    InvalidData,
    /// Malformed request or config value.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
}

impl ErrorKind {
    /// String representation used in logs and test vectors.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Io => "IO",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Parse => "PARSE",
            ErrorKind::MissingField => "MISSING_FIELD",
            ErrorKind::InvalidData => "INVALID_DATA",
            ErrorKind::BadRequest => "BAD_REQUEST",
            ErrorKind::UnsupportedVersion => "UNSUPPORTED_VERSION",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricStageError>;

/// Unified error type used by core and store.
#[derive(Debug, Error)]
pub enum MetricStageError {
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("metric file not found: {}", path.display())]
    NotFound { path: PathBuf },
    #[error("invalid yaml in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    #[error("missing field: {0}")]
    MissingField(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
}

impl MetricStageError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MetricStageError::Io {
            path: path.into(),
            source,
        }
    }

    /// Map to a stable error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MetricStageError::Io { .. } => ErrorKind::Io,
            MetricStageError::NotFound { .. } => ErrorKind::NotFound,
            MetricStageError::Parse { .. } => ErrorKind::Parse,
            MetricStageError::MissingField(_) => ErrorKind::MissingField,
            MetricStageError::InvalidData(_) => ErrorKind::InvalidData,
            MetricStageError::BadRequest(_) => ErrorKind::BadRequest,
            MetricStageError::UnsupportedVersion => ErrorKind::UnsupportedVersion,
        }
    }
}
