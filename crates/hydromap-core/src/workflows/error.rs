use crate::core::io::indus::IndusLogError;
use crate::core::io::pdb::PdbWriteError;
use crate::core::io::pqr::PqrError;
use crate::core::io::tables::TableError;
use crate::engine::config::SettingsError;
use crate::engine::error::EngineError;
use crate::plot::error::PlotError;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Structure loading failed: {0}")]
    Structure(#[from] PqrError),

    #[error("Table loading failed: {0}")]
    Table(#[from] TableError),

    #[error("Log parsing failed: {0}")]
    Log(#[from] IndusLogError),

    #[error("Settings loading failed: {0}")]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Rendering failed: {0}")]
    Plot(#[from] PlotError),

    #[error("Structure writing failed: {0}")]
    Pdb(#[from] PdbWriteError),

    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid input: {0}")]
    Invalid(String),
}

impl WorkflowError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        WorkflowError::Io {
            path: path.to_string_lossy().to_string(),
            source,
        }
    }
}
