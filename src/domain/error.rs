use thiserror::Error;

/// Outcomes the service reports to its callers besides success.
#[derive(Debug, Error)]
pub enum TodoError {
    #[error("todo not found")]
    NotFound,

    #[error("subject must not be empty")]
    InvalidSubject,

    #[error("store error: {0}")]
    Internal(#[from] anyhow::Error),
}

