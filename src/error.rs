//! Error type shared by the orchestration layer.

use std::path::PathBuf;

/// Everything that can go wrong while preparing, running or reading back a GIES run.
#[derive(Debug, thiserror::Error)]
pub enum GiesError {
    #[error("R package {package} is not available")]
    PackageUnavailable { package: String },

    #[error("unknown score '{0}' (expected obs|observational|int|interventional)")]
    UnknownScore(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("R script failed (exit code {code:?}): {stderr}")]
    ScriptFailed { code: Option<i32>, stderr: String },

    #[error("malformed result matrix: {0}")]
    MalformedResult(String),

    #[error("invalid dataset: {0}")]
    Dataset(String),

    #[error("skeleton node '{0}' is not a dataset column")]
    UnknownNode(String),

    #[error("failed to remove workspace {}: {source}", path.display())]
    Cleanup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = GiesError> = std::result::Result<T, E>;
