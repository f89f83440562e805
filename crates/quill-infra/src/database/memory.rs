//! In-memory repositories.
//!
//! Used as the fallback store when `DATABASE_URL` is not configured, and by
//! the api-server handler tests. Same contract as the Postgres repositories,
//! including the unique-username constraint and newest-first ordering.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{Post, User};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, PostRepository, UserRepository};

/// In-memory user store keyed by id.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn insert(&self, entity: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.username == entity.username) {
            return Err(RepoError::Constraint(format!(
                "username '{}' already exists",
                entity.username
            )));
        }
        users.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;
        if !users.contains_key(&entity.id) {
            return Err(RepoError::NotFound);
        }
        users.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

/// In-memory post store keyed by id.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<Uuid, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    posts
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn insert(&self, entity: Post) -> Result<Post, RepoError> {
        self.posts.write().await.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;
        if !posts.contains_key(&entity.id) {
            return Err(RepoError::NotFound);
        }
        posts.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.posts
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(newest_first(
            self.posts.read().await.values().cloned().collect(),
        ))
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<Post>, RepoError> {
        Ok(newest_first(
            self.posts
                .read()
                .await
                .values()
                .filter(|p| p.author_id == author_id)
                .cloned()
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    #[tokio::test]
    async fn duplicate_username_violates_constraint() {
        let repo = InMemoryUserRepository::new();

        repo.insert(User::new("alice".into(), "hash-1".into()))
            .await
            .unwrap();
        let err = repo
            .insert(User::new("alice".into(), "hash-2".into()))
            .await
            .unwrap_err();

        assert!(matches!(err, RepoError::Constraint(_)));
        assert_eq!(repo.users.read().await.len(), 1);
    }

    #[tokio::test]
    async fn posts_come_back_newest_first() {
        let repo = InMemoryPostRepository::new();
        let author = Uuid::new_v4();
        let now = Utc::now();

        for (title, age_minutes) in [("oldest", 30), ("newest", 10), ("middle", 20)] {
            let mut post = Post::new(author, title.into(), String::new());
            post.created_at = now - Duration::minutes(age_minutes);
            post.updated_at = post.created_at;
            repo.insert(post).await.unwrap();
        }

        let titles: Vec<String> = repo
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, ["newest", "middle", "oldest"]);
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_post_report_not_found() {
        let repo = InMemoryPostRepository::new();
        let ghost = Post::new(Uuid::new_v4(), "gone".into(), String::new());

        assert!(matches!(
            repo.update(ghost.clone()).await,
            Err(RepoError::NotFound)
        ));
        assert!(matches!(repo.delete(ghost.id).await, Err(RepoError::NotFound)));
    }
}
