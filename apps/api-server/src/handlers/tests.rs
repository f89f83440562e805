//! End-to-end handler tests running against the in-memory store.

use actix_web::{App, http::StatusCode, middleware::NormalizePath, test, web};
use serde_json::{Value, json};

use crate::state::AppState;

macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .wrap(NormalizePath::trim())
                .app_data(web::Data::new(AppState::in_memory()))
                .configure(super::configure_routes),
        )
        .await
    };
}

macro_rules! register {
    ($app:expr, $username:expr) => {{
        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(json!({"username": $username, "password": "correct horse"}))
            .to_request();
        test::call_service(&$app, req).await
    }};
}

macro_rules! login {
    ($app:expr, $username:expr) => {{
        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(json!({"username": $username, "password": "correct horse"}))
            .to_request();
        let res = test::call_service(&$app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["token_type"], "bearer");
        body["access_token"].as_str().unwrap().to_string()
    }};
}

macro_rules! create_post {
    ($app:expr, $token:expr, $title:expr, $content:expr) => {{
        let req = test::TestRequest::post()
            .uri("/posts/")
            .insert_header(("Authorization", format!("Bearer {}", $token)))
            .set_json(json!({"title": $title, "content": $content}))
            .to_request();
        let res = test::call_service(&$app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        body
    }};
}

#[actix_web::test]
async fn health_reports_ok() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/health").to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn register_then_login_issues_a_token() {
    let app = test_app!();

    let res = register!(app, "alice");
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["msg"], "User registered successfully");

    let token = login!(app, "alice");
    assert!(!token.is_empty());
}

#[actix_web::test]
async fn duplicate_registration_is_a_bad_request() {
    let app = test_app!();

    assert_eq!(register!(app, "alice").status(), StatusCode::CREATED);

    let res = register!(app, "alice");
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["detail"], "Username already exists");
}

#[actix_web::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = test_app!();
    register!(app, "alice");

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({"username": "alice", "password": "wrong horse"}))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["detail"], "Invalid credentials");
}

#[actix_web::test]
async fn protected_routes_reject_missing_and_garbage_tokens() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/posts/")
        .set_json(json!({"title": "t", "content": "c"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );

    let req = test::TestRequest::get()
        .uri("/posts/me")
        .insert_header(("Authorization", "Bearer not-a-real-token"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn token_for_a_deleted_user_does_not_authenticate() {
    use quill_core::ports::TokenService;
    use quill_infra::auth::{JwtConfig, JwtTokenService};

    let app = test_app!();

    // Well-formed and correctly signed, but no such user row exists.
    let tokens = JwtTokenService::new(JwtConfig::default());
    let token = tokens.issue("ghost").unwrap();

    let req = test::TestRequest::get()
        .uri("/posts/me")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn create_and_list_posts_newest_first() {
    let app = test_app!();
    register!(app, "alice");
    let token = login!(app, "alice");

    let first = create_post!(app, token, "First post", "Hello");
    assert_eq!(first["author"], "alice");
    assert_eq!(first["title"], "First post");
    create_post!(app, token, "Second post", "World");

    // Listing is public - no token.
    let req = test::TestRequest::get().uri("/posts/").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = test::read_body_json(res).await;
    let posts = body.as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["title"], "Second post");
    assert_eq!(posts[1]["title"], "First post");
    assert!(posts.iter().all(|p| p["author"] == "alice"));
}

#[actix_web::test]
async fn my_posts_are_filtered_to_the_caller() {
    let app = test_app!();
    register!(app, "alice");
    register!(app, "bob");
    let alice = login!(app, "alice");
    let bob = login!(app, "bob");

    create_post!(app, alice, "Alice's", "a");
    create_post!(app, bob, "Bob's", "b");

    let req = test::TestRequest::get()
        .uri("/posts/me")
        .insert_header(("Authorization", format!("Bearer {alice}")))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = test::read_body_json(res).await;
    let posts = body.as_array().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["title"], "Alice's");
}

#[actix_web::test]
async fn only_the_author_may_update_or_delete() {
    let app = test_app!();
    register!(app, "alice");
    register!(app, "bob");
    let alice = login!(app, "alice");
    let bob = login!(app, "bob");

    let post = create_post!(app, alice, "Original", "Body");
    let id = post["id"].as_str().unwrap().to_string();

    // Bob may not touch Alice's post.
    let req = test::TestRequest::put()
        .uri(&format!("/posts/{id}"))
        .insert_header(("Authorization", format!("Bearer {bob}")))
        .set_json(json!({"title": "Hijacked"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let req = test::TestRequest::delete()
        .uri(&format!("/posts/{id}"))
        .insert_header(("Authorization", format!("Bearer {bob}")))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    // Alice updates: absent content stays untouched.
    let req = test::TestRequest::put()
        .uri(&format!("/posts/{id}"))
        .insert_header(("Authorization", format!("Bearer {alice}")))
        .set_json(json!({"title": "Renamed"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["title"], "Renamed");
    assert_eq!(body["content"], "Body");

    // Alice deletes.
    let req = test::TestRequest::delete()
        .uri(&format!("/posts/{id}"))
        .insert_header(("Authorization", format!("Bearer {alice}")))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["msg"], "Post deleted");

    let req = test::TestRequest::get().uri("/posts/").to_request();
    let res = test::call_service(&app, req).await;
    let body: Value = test::read_body_json(res).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn acting_on_a_missing_post_is_not_found() {
    let app = test_app!();
    register!(app, "alice");
    let token = login!(app, "alice");
    let ghost = uuid::Uuid::new_v4();

    let req = test::TestRequest::put()
        .uri(&format!("/posts/{ghost}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({"title": "anything"}))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::delete()
        .uri(&format!("/posts/{ghost}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}
