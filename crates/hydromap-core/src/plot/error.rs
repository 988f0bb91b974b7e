use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Rendering failed for '{path}': {reason}")]
    Backend { path: String, reason: String },

    #[error("Inconsistent plot input: {0}")]
    Inconsistency(String),
}

impl PlotError {
    pub(crate) fn backend(path: &Path, reason: impl std::fmt::Display) -> Self {
        PlotError::Backend {
            path: path.to_string_lossy().to_string(),
            reason: reason.to_string(),
        }
    }
}
