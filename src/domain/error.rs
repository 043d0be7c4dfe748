use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("Internal error: {0}")]
    Internal(String),
}
