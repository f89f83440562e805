//! Post CRUD with ownership enforcement.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Post, PostWithAuthor, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{BaseRepository, PostRepository, UserRepository};

/// CRUD on posts. Every mutation goes through the same ownership guard:
/// existence is checked first, then authorship, so acting on a missing post
/// yields `PostNotFound` while acting on someone else's yields `NotPostAuthor`.
#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    /// Create a post authored by the caller.
    pub async fn create(
        &self,
        author: &User,
        title: String,
        content: String,
    ) -> Result<Post, DomainError> {
        let post = Post::new(author.id, title, content);
        Ok(self.posts.insert(post).await?)
    }

    /// All posts with their authors' usernames, newest first. Public.
    pub async fn list_all(&self) -> Result<Vec<PostWithAuthor>, DomainError> {
        let posts = self.posts.find_all().await?;

        let mut usernames: HashMap<Uuid, String> = HashMap::new();
        let mut listing = Vec::with_capacity(posts.len());
        for post in posts {
            let author = match usernames.get(&post.author_id) {
                Some(name) => name.clone(),
                None => {
                    // The FK guarantees an author row exists for every post.
                    let user = self
                        .users
                        .find_by_id(post.author_id)
                        .await?
                        .ok_or_else(|| {
                            DomainError::Internal(format!("post {} has no author row", post.id))
                        })?;
                    usernames.insert(post.author_id, user.username.clone());
                    user.username
                }
            };
            listing.push(PostWithAuthor { post, author });
        }
        Ok(listing)
    }

    /// The caller's own posts, newest first.
    pub async fn list_mine(&self, caller: &User) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.find_by_author(caller.id).await?)
    }

    /// Partially update a post the caller owns. See [`Post::revise`] for the
    /// absent/empty field semantics.
    pub async fn update(
        &self,
        caller: &User,
        post_id: Uuid,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Post, DomainError> {
        let mut post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;
        ensure_author(caller, &post)?;

        post.revise(title, content);
        match self.posts.update(post).await {
            // Lost a race against a concurrent delete.
            Err(RepoError::NotFound) => Err(DomainError::PostNotFound(post_id)),
            other => Ok(other?),
        }
    }

    /// Delete a post the caller owns, returning a snapshot of the deleted row.
    pub async fn delete(&self, caller: &User, post_id: Uuid) -> Result<Post, DomainError> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound(post_id))?;
        ensure_author(caller, &post)?;

        match self.posts.delete(post_id).await {
            Err(RepoError::NotFound) => Err(DomainError::PostNotFound(post_id)),
            Err(e) => Err(e.into()),
            Ok(()) => Ok(post),
        }
    }
}

/// Ownership guard shared by every mutating operation.
fn ensure_author(caller: &User, post: &Post) -> Result<(), DomainError> {
    if post.author_id != caller.id {
        return Err(DomainError::NotPostAuthor(post.id));
    }
    Ok(())
}
