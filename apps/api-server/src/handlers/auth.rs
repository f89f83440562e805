//! Registration and login handlers.

use actix_web::{HttpResponse, web};

use quill_shared::dto::{LoginRequest, MessageResponse, RegisterRequest, TokenResponse};

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state.accounts.register(&req.username, &req.password).await?;
    tracing::info!(username = %user.username, "user registered");

    Ok(HttpResponse::Created().json(MessageResponse {
        msg: "User registered successfully".to_string(),
    }))
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let access_token = state.accounts.login(&req.username, &req.password).await?;

    Ok(HttpResponse::Ok().json(TokenResponse {
        access_token,
        token_type: "bearer".to_string(),
    }))
}
