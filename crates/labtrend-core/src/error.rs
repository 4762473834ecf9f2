use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LabtrendError {
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("failed to parse value: {0}")]
    ParseError(String),

    #[error("failed to load catalog from {path}: {reason}")]
    CatalogLoad { path: PathBuf, reason: String },

    #[error("invalid catalog: {0}")]
    CatalogInvalid(String),

    #[error("BMI store at {path} is unusable: {reason}")]
    Store { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
