//! Pipeline error taxonomy.
//!
//! Every error here aborts the run: the pipeline either produces a full,
//! internally consistent dataset or writes nothing. There is no
//! partial-success mode.

use thiserror::Error;

use crate::portal::ExtractError;

/// Errors that can abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Bad input before any network call: court table, filter terms, config.
    #[error("validation error: {0}")]
    Validation(String),

    /// A fetched document was not in the expected shape.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// A positional merge was attempted over collections of differing length.
    /// This means the court-order invariant was already broken upstream.
    #[error("alignment error in {context}: expected {expected} elements, got {actual}")]
    Alignment {
        context: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A portal request failed. Fatal for the whole batch; no retry policy.
    #[error("fetch failed for {endpoint}: {source}")]
    Fetch {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Reading inputs or writing sheets/state.
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The run-state marker could not be read or written.
    #[error("state error: {0}")]
    State(String),
}

impl PipelineError {
    /// Attach a path to an io error.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
