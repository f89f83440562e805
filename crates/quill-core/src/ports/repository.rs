use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
/// Each operation is a single transaction against the underlying store.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. A unique-constraint violation surfaces as
    /// [`RepoError::Constraint`].
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Update an existing entity. Returns [`RepoError::NotFound`] when the
    /// row no longer exists (e.g. lost a race against a delete).
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific lookups.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their unique username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// All posts, newest `created_at` first.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;

    /// Posts by one author, newest `created_at` first.
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError>;
}
