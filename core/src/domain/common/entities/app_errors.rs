use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("External service timed out")]
    Timeout,

    #[error("Internal server error")]
    InternalServerError,
}
