use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid field path: '{0}'")]
    InvalidPath(String),

    #[error("field path '{path}' conflicts with an existing {existing} at '{at}'")]
    PathConflict {
        path: String,
        at: String,
        existing: &'static str,
    },
}
