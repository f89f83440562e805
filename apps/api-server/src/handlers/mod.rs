//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Public routes
        .route("/health", web::get().to(health::health_check))
        // Auth routes
        .route("/register", web::post().to(auth::register))
        .route("/login", web::post().to(auth::login))
        // Post routes
        .service(
            web::scope("/posts")
                .route("", web::post().to(posts::create))
                .route("", web::get().to(posts::list))
                .route("/me", web::get().to(posts::list_mine))
                .route("/{id}", web::put().to(posts::update))
                .route("/{id}", web::delete().to(posts::delete)),
        );
}

#[cfg(test)]
mod tests;
