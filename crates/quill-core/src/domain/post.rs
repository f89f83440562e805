use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity. `author_id` is set at creation and immutable afterwards;
/// only the author may mutate or delete the post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post authored by `author_id`.
    pub fn new(author_id: Uuid, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            author_id,
            title,
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a partial edit. An absent or empty field leaves the stored value
    /// unchanged (a caller cannot clear a field to empty through an update).
    /// `updated_at` is refreshed on every call, even when nothing changed.
    pub fn revise(&mut self, title: Option<String>, content: Option<String>) {
        if let Some(title) = title {
            if !title.is_empty() {
                self.title = title;
            }
        }
        if let Some(content) = content {
            if !content.is_empty() {
                self.content = content;
            }
        }
        self.updated_at = Utc::now();
    }
}

/// A post paired with its author's username, as exposed by public listings.
#[derive(Debug, Clone)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: String,
}
