//! Run-state marker.
//!
//! The portal publishes one table set per week; re-running inside the same
//! week would rewrite identical sheets. The marker remembers the last
//! processed week label so the pipeline can skip redundant runs. It is read
//! at start and written only at successful completion, and reaches the
//! pipeline as an injected dependency, never as module state.

use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// What the marker file stores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMarker {
    pub week_label: String,
    pub updated_at: DateTime<Utc>,
}

/// Persistence seam for the week marker.
pub trait StateStore {
    /// The label recorded by the previous successful run, if any.
    fn last_week_label(&self) -> Result<Option<String>, PipelineError>;

    /// Overwrite the marker after a successful run.
    fn record_week_label(&self, label: &str) -> Result<(), PipelineError>;
}

/// JSON-file-backed marker store.
pub struct JsonStateStore {
    path: PathBuf,
}

impl JsonStateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StateStore for JsonStateStore {
    fn last_week_label(&self) -> Result<Option<String>, PipelineError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PipelineError::io(self.path.display().to_string(), e)),
        };
        let marker: RunMarker = serde_json::from_str(&text).map_err(|e| {
            PipelineError::State(format!(
                "corrupt marker file {}: {}",
                self.path.display(),
                e
            ))
        })?;
        Ok(Some(marker.week_label))
    }

    fn record_week_label(&self, label: &str) -> Result<(), PipelineError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| PipelineError::io(parent.display().to_string(), e))?;
            }
        }
        let marker = RunMarker {
            week_label: label.to_string(),
            updated_at: Utc::now(),
        };
        let text = serde_json::to_string_pretty(&marker)
            .map_err(|e| PipelineError::State(format!("serializing marker: {e}")))?;
        fs::write(&self.path, text)
            .map_err(|e| PipelineError::io(self.path.display().to_string(), e))
    }
}
