//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! Argon2 password hashing, JWT tokens, and the persistence layer.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL persistence via SeaORM. Without it the
//!   crate still provides the in-memory repositories.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{DatabaseConfig, InMemoryPostRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, PostgresPostRepository, PostgresUserRepository};
