use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Carries the validator message verbatim.
    #[error("{0}")]
    Validation(String),
    #[error("user with id {0} not found")]
    NotFound(String),
}

impl ServiceError {
    pub fn not_found(id: &str) -> Self { Self::NotFound(id.to_string()) }
}
