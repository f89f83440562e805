//! Post CRUD handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use quill_core::domain::{Post, PostWithAuthor};
use quill_shared::dto::{CreatePostRequest, MessageResponse, PostResponse, UpdatePostRequest};

use crate::middleware::auth::CurrentUser;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn post_out(post: Post, author: String) -> PostResponse {
    PostResponse {
        id: post.id,
        title: post.title,
        content: post.content,
        created_at: post.created_at,
        updated_at: post.updated_at,
        author,
    }
}

/// POST /posts - create a post authored by the caller.
pub async fn create(
    state: web::Data<AppState>,
    user: CurrentUser,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let post = state.posts.create(&user.0, req.title, req.content).await?;

    Ok(HttpResponse::Ok().json(post_out(post, user.0.username)))
}

/// GET /posts - all posts, newest first. Public.
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let listing = state.posts.list_all().await?;

    let body: Vec<PostResponse> = listing
        .into_iter()
        .map(|PostWithAuthor { post, author }| post_out(post, author))
        .collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/me - the caller's posts, newest first.
pub async fn list_mine(state: web::Data<AppState>, user: CurrentUser) -> AppResult<HttpResponse> {
    let posts = state.posts.list_mine(&user.0).await?;

    let body: Vec<PostResponse> = posts
        .into_iter()
        .map(|post| post_out(post, user.0.username.clone()))
        .collect();

    Ok(HttpResponse::Ok().json(body))
}

/// PUT /posts/{id} - partial update, author only.
pub async fn update(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let req = body.into_inner();

    let post = state
        .posts
        .update(&user.0, post_id, req.title, req.content)
        .await?;

    Ok(HttpResponse::Ok().json(post_out(post, user.0.username)))
}

/// DELETE /posts/{id} - author only.
pub async fn delete(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();

    let post = state.posts.delete(&user.0, post_id).await?;
    tracing::info!(post_id = %post.id, author = %user.0.username, "post deleted");

    Ok(HttpResponse::Ok().json(MessageResponse {
        msg: "Post deleted".to_string(),
    }))
}
