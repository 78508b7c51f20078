//! Error taxonomy shared by every domain service.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Bad request payload, e.g. an unknown denomination
    #[error("{0}")]
    Validation(String),

    /// No credential was presented
    #[error("Authentication required")]
    Unauthenticated,

    /// A credential was presented but is wrong, unknown or expired
    #[error("{0}")]
    InvalidCredential(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Duplicate unique key
    #[error("{0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

impl DomainError {
    /// Stable machine-readable code for API consumers
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "VALIDATION",
            DomainError::Unauthenticated => "UNAUTHENTICATED",
            DomainError::InvalidCredential(_) => "INVALID_CREDENTIAL",
            DomainError::Forbidden(_) => "FORBIDDEN",
            DomainError::NotFound(_) => "NOT_FOUND",
            DomainError::Conflict(_) => "CONFLICT",
            DomainError::Storage(_) => "STORAGE",
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
