//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{PasswordService, PostRepository, TokenService, UserRepository};
use quill_core::service::{AccountService, PostService};
use quill_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
use quill_infra::database::{InMemoryPostRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
use quill_infra::database::{DatabaseConfig, DatabaseConnections, PostgresPostRepository, PostgresUserRepository};

#[cfg(not(feature = "postgres"))]
use quill_infra::database::DatabaseConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Used by the auth extractor to re-resolve token subjects.
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub accounts: AccountService,
    pub posts: PostService,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());
        let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

        #[cfg(feature = "postgres")]
        let (users, posts): (Arc<dyn UserRepository>, Arc<dyn PostRepository>) = {
            if let Some(config) = db_config {
                match DatabaseConnections::init(config).await {
                    Ok(connections) => (
                        Arc::new(PostgresUserRepository::new(connections.main.clone())),
                        Arc::new(PostgresPostRepository::new(connections.main)),
                    ),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory storage.",
                            e
                        );
                        in_memory_repos()
                    }
                }
            } else {
                tracing::warn!(
                    "DATABASE_URL not set. Running with in-memory storage (data is lost on restart)."
                );
                in_memory_repos()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let (users, posts): (Arc<dyn UserRepository>, Arc<dyn PostRepository>) = {
            let _ = db_config;
            tracing::info!("Built without postgres feature - using in-memory storage");
            in_memory_repos()
        };

        tracing::info!("Application state initialized");

        Self::assemble(users, posts, tokens, passwords)
    }

    /// Fully in-memory state with a default JWT config. Used by tests.
    pub fn in_memory() -> Self {
        let (users, posts) = in_memory_repos();
        Self::assemble(
            users,
            posts,
            Arc::new(JwtTokenService::new(JwtConfig::default())),
            Arc::new(Argon2PasswordService::new()),
        )
    }

    fn assemble(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
    ) -> Self {
        Self {
            accounts: AccountService::new(users.clone(), passwords, tokens.clone()),
            posts: PostService::new(posts, users.clone()),
            users,
            tokens,
        }
    }
}

fn in_memory_repos() -> (Arc<dyn UserRepository>, Arc<dyn PostRepository>) {
    (
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryPostRepository::new()),
    )
}
