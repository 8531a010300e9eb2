// Credential checks on protected routes.
//
// Anything behind the auth layer answers 401 for missing or malformed
// credentials and 403 for tokens that fail verification, without contacting
// an upstream.

use actix_web::test;
use gateway_test_support::error_body::assert_error_response;
use gateway_test_support::stub_upstream::{StubRoute, StubUpstream};
use gateway_test_support::tokens::{bearer, expired_token_for, foreign_token_for};
use serde_json::json;

use crate::common::header_str;
use crate::support::{create_test_app, Upstreams};

#[actix_web::test]
async fn missing_header_is_401_with_bearer_challenge() {
    let notes = StubUpstream::start(vec![StubRoute::new("GET", "/notes", 200, json!([]))]).await;
    let app = create_test_app(Upstreams::default().notes(&notes.base_url))
        .build()
        .await;

    let req = test::TestRequest::get().uri("/notes").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(header_str(resp.headers(), "www-authenticate"), Some("Bearer"));
    assert_error_response(resp, 401, "UNAUTHORIZED", "Unauthorized").await;
    assert!(notes.requests().is_empty(), "notes service should not be contacted");

    notes.stop().await;
}

#[actix_web::test]
async fn non_bearer_schemes_are_401() {
    let app = create_test_app(Upstreams::default()).build().await;

    for header in ["Basic dXNlcjpwYXNz", "Bearer", "token-without-scheme"] {
        let req = test::TestRequest::post()
            .uri("/analyze")
            .insert_header(("Authorization", header))
            .set_json(json!({"text": "hi"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_error_response(resp, 401, "UNAUTHORIZED", "Unauthorized").await;
    }
}

#[actix_web::test]
async fn expired_token_is_403() {
    let app = create_test_app(Upstreams::default()).build().await;

    let req = test::TestRequest::get()
        .uri("/notes")
        .insert_header(("Authorization", bearer(&expired_token_for("7", "e@example.test"))))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_response(resp, 403, "INVALID_TOKEN", "Invalid token").await;
}

#[actix_web::test]
async fn token_signed_with_another_secret_is_403() {
    let app = create_test_app(Upstreams::default()).build().await;

    let req = test::TestRequest::get()
        .uri("/users/7")
        .insert_header(("Authorization", bearer(&foreign_token_for("7", "f@example.test"))))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_response(resp, 403, "INVALID_TOKEN", "Invalid token").await;
}

#[actix_web::test]
async fn garbage_token_is_403() {
    let app = create_test_app(Upstreams::default()).build().await;

    let req = test::TestRequest::get()
        .uri("/notes")
        .insert_header(("Authorization", "Bearer not.a.jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_response(resp, 403, "INVALID_TOKEN", "Invalid token").await;
}

#[actix_web::test]
async fn rejected_requests_keep_caller_request_id() {
    let app = create_test_app(Upstreams::default()).build().await;

    let req = test::TestRequest::get()
        .uri("/notes")
        .insert_header(("x-request-id", "frontend-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(header_str(resp.headers(), "x-request-id"), Some("frontend-123"));
    assert_eq!(header_str(resp.headers(), "x-trace-id"), Some("frontend-123"));
    assert_error_response(resp, 401, "UNAUTHORIZED", "Unauthorized").await;
}

#[actix_web::test]
async fn auth_routes_ignore_bad_credentials() {
    let user = StubUpstream::start(vec![StubRoute::new(
        "POST",
        "/users/login",
        200,
        json!({"token": "t"}),
    )])
    .await;
    let app = create_test_app(Upstreams::default().user(&user.base_url))
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .insert_header(("Authorization", bearer(&expired_token_for("7", "e@example.test"))))
        .set_json(json!({"email": "e@example.test", "password": "pw"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(user.requests_to("/users/login").len(), 1);

    user.stop().await;
}
