//! @ai:module:intent Error taxonomy for the benchmark harness
//! @ai:module:layer domain
//! @ai:module:public_api BackendError, CorpusError
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Failure of a single backend invocation
///
/// Per-item errors: the driver converts either variant into a SKIPPED
/// pair and continues the batch. Neither variant ever aborts a run.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The audio/text source for a corpus item could not be found.
    #[error("resource missing: {0}")]
    ResourceMissing(PathBuf),

    /// The backend itself raised an internal error (endpoint failure,
    /// CLI exit code, malformed response).
    #[error("backend failure: {reason}")]
    Failure {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl BackendError {
    /// @ai:intent Build an internal failure from a displayable cause
    /// @ai:effects pure
    pub fn failure(reason: impl Into<String>) -> Self {
        BackendError::Failure {
            reason: reason.into(),
            source: None,
        }
    }

    /// @ai:intent Build an internal failure wrapping an upstream error
    /// @ai:effects pure
    pub fn failure_with(
        reason: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        BackendError::Failure {
            reason: reason.into(),
            source: Some(source.into()),
        }
    }
}

/// @ai:intent Corpus-level setup errors
///
/// Unlike `BackendError`, these are fatal: with no corpus there is
/// nothing to invoke, so the run aborts before any backend call.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("corpus directory unavailable: {0}")]
    Unavailable(PathBuf),

    #[error("failed to read expectations manifest {path}: {source}")]
    BadManifest {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
