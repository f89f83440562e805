//! Auth guard: turns a bearer token into an authenticated user.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;

use quill_core::domain::User;
use quill_core::ports::{AuthError, TokenService, UserRepository};
use quill_shared::ErrorResponse;

use crate::state::AppState;

/// Authenticated user extractor.
///
/// Use this in handlers to require authentication:
/// ```ignore
/// async fn protected_route(user: CurrentUser) -> impl Responder {
///     format!("Hello, {}!", user.0.username)
/// }
/// ```
///
/// The token subject is re-resolved against the user store on every request;
/// a token whose user no longer exists does not authenticate.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Error type for authentication failures.
#[derive(Debug)]
pub struct AuthenticationError(pub AuthError);

impl std::fmt::Display for AuthenticationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl actix_web::ResponseError for AuthenticationError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        match &self.0 {
            AuthError::Hashing(_) => actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
            _ => actix_web::http::StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let error = match &self.0 {
            AuthError::MissingAuth => ErrorResponse::unauthorized()
                .with_detail("Please provide a valid Bearer token in the Authorization header."),
            AuthError::InvalidToken => {
                ErrorResponse::unauthorized().with_detail("Invalid or expired token.")
            }
            AuthError::Hashing(_) => ErrorResponse::internal_error(),
        };

        actix_web::HttpResponse::build(self.status_code()).json(error)
    }
}

impl FromRequest for CurrentUser {
    type Error = AuthenticationError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            let state = req
                .app_data::<web::Data<AppState>>()
                .ok_or_else(|| {
                    tracing::error!("AppState not found in app data");
                    AuthenticationError(AuthError::InvalidToken)
                })?;

            let token = bearer_token(&req)?;
            let claims = state.tokens.verify(token).map_err(AuthenticationError)?;

            // Re-resolve the subject; never trust a cached identity.
            let user = state
                .users
                .find_by_username(&claims.subject)
                .await
                .map_err(|e| {
                    tracing::error!(error = %e, "user lookup failed during authentication");
                    AuthenticationError(AuthError::InvalidToken)
                })?
                .ok_or_else(|| {
                    tracing::debug!(subject = %claims.subject, "token subject no longer exists");
                    AuthenticationError(AuthError::InvalidToken)
                })?;

            Ok(CurrentUser(user))
        })
    }
}

/// Extract the raw token from an `Authorization: Bearer <token>` header.
fn bearer_token(req: &HttpRequest) -> Result<&str, AuthenticationError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthenticationError(AuthError::MissingAuth))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthenticationError(AuthError::InvalidToken))?;

    auth_str
        .strip_prefix("Bearer ")
        .ok_or(AuthenticationError(AuthError::InvalidToken))
}
