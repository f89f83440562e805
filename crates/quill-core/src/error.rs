//! Domain-level error types.

use thiserror::Error;
use uuid::Uuid;

/// Domain errors - business rule failures.
///
/// Each variant maps to exactly one HTTP status at the boundary; the mapping
/// lives in the api-server crate.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("post not found: {0}")]
    PostNotFound(Uuid),

    #[error("username already taken: {0}")]
    DuplicateUsername(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("caller is not the author of post {0}")]
    NotPostAuthor(Uuid),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("database connection failed: {0}")]
    Connection(String),

    #[error("query execution failed: {0}")]
    Query(String),

    #[error("entity not found")]
    NotFound,

    #[error("constraint violation: {0}")]
    Constraint(String),
}

impl From<RepoError> for DomainError {
    fn from(err: RepoError) -> Self {
        // Services that care about specific repo outcomes (NotFound on a
        // concurrent delete, Constraint on a duplicate username) match on
        // them explicitly before falling through to this conversion.
        DomainError::Internal(err.to_string())
    }
}
