//! Domain entities - the core business objects.

mod post;
mod user;

pub use post::{Post, PostWithAuthor};
pub use user::User;
