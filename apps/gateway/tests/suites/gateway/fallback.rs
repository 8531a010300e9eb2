// Paths no route matches.

use actix_web::test;
use gateway_test_support::error_body::assert_error_response;
use gateway_test_support::tokens::{bearer, token_for};

use crate::common::header_str;
use crate::support::{create_test_app, Upstreams};

#[actix_web::test]
async fn unknown_path_is_401_for_anonymous_callers() {
    let app = create_test_app(Upstreams::default()).build().await;

    let req = test::TestRequest::get().uri("/does-not-exist").to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_response(resp, 401, "UNAUTHORIZED", "Unauthorized").await;
}

#[actix_web::test]
async fn unknown_path_is_404_for_authenticated_callers() {
    let app = create_test_app(Upstreams::default()).build().await;

    let req = test::TestRequest::get()
        .uri("/does-not-exist")
        .insert_header(("Authorization", bearer(&token_for("7", "a@example.test"))))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert!(header_str(resp.headers(), "x-request-id").is_some());
    assert_error_response(resp, 404, "NOT_FOUND", "Not found").await;
}

#[actix_web::test]
async fn nested_health_path_skips_auth_then_misses() {
    let app = create_test_app(Upstreams::default()).build().await;

    let req = test::TestRequest::get().uri("/notes/health").to_request();
    let resp = test::call_service(&app, req).await;

    // `/notes/{id}` matches but no claims are present, so the handler refuses.
    assert_error_response(resp, 401, "UNAUTHORIZED", "Unauthorized").await;
}
