//! Registration and login.

use std::sync::Arc;

use crate::domain::User;
use crate::error::{DomainError, RepoError};
use crate::ports::{BaseRepository, PasswordService, TokenService, UserRepository};

/// User registration and password-based login.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AccountService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Register a new user. Fails with [`DomainError::DuplicateUsername`]
    /// without side effects when the username is already taken.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, DomainError> {
        if username.is_empty() {
            return Err(DomainError::Validation(
                "username must not be empty".to_string(),
            ));
        }

        if self.users.find_by_username(username).await?.is_some() {
            return Err(DomainError::DuplicateUsername(username.to_string()));
        }

        let password_hash = self
            .passwords
            .hash(password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let user = User::new(username.to_string(), password_hash);
        match self.users.insert(user).await {
            Ok(user) => Ok(user),
            // The unique index catches registrations racing past the
            // pre-check above.
            Err(RepoError::Constraint(_)) => {
                Err(DomainError::DuplicateUsername(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Verify credentials and issue a bearer token bound to the username.
    /// Unknown user and wrong password are indistinguishable to the caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        if !self.passwords.verify(password, &user.password_hash) {
            return Err(DomainError::InvalidCredentials);
        }

        self.tokens
            .issue(&user.username)
            .map_err(|e| DomainError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::fakes::{FakeUsers, PlainHasher, StaticTokens};

    fn service() -> AccountService {
        AccountService::new(
            Arc::new(FakeUsers::default()),
            Arc::new(PlainHasher),
            Arc::new(StaticTokens),
        )
    }

    #[tokio::test]
    async fn register_then_login() {
        let accounts = service();

        let user = accounts.register("alice", "wonderland").await.unwrap();
        assert_eq!(user.username, "alice");
        assert_ne!(user.password_hash, "wonderland");

        let token = accounts.login("alice", "wonderland").await.unwrap();
        assert_eq!(token, "token-for-alice");
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected_without_side_effects() {
        let users = Arc::new(FakeUsers::default());
        let accounts = AccountService::new(users.clone(), Arc::new(PlainHasher), Arc::new(StaticTokens));

        accounts.register("alice", "first").await.unwrap();
        let err = accounts.register("alice", "second").await.unwrap_err();

        assert!(matches!(err, DomainError::DuplicateUsername(_)));
        assert_eq!(users.0.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn empty_username_is_rejected() {
        let err = service().register("", "secret").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn login_with_unknown_user_fails() {
        let err = service().login("nobody", "secret").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }

    #[tokio::test]
    async fn login_with_wrong_password_fails() {
        let accounts = service();
        accounts.register("alice", "wonderland").await.unwrap();

        let err = accounts.login("alice", "through-the-glass").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidCredentials));
    }
}
