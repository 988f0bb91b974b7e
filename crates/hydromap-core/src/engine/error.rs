use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Classification table for scheme '{scheme}' has no entry for {key}")]
    MissingEntry { scheme: &'static str, key: String },

    #[error(
        "Classification input for scheme '{scheme}' covers {found} atoms but the selection has {expected}"
    )]
    LengthMismatch {
        scheme: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}
