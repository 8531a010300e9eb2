// Ownership-checked profile proxy.

use actix_web::test;
use gateway_test_support::error_body::assert_error_response;
use gateway_test_support::stub_upstream::{StubRoute, StubUpstream};
use gateway_test_support::tokens::{bearer, token_for, token_for_numeric_id};
use serde_json::{json, Value};
use test_support::unique_user_id;

use crate::support::{create_test_app, Upstreams};

#[actix_web::test]
async fn other_users_profile_is_403_without_upstream_call() {
    let user = StubUpstream::start(vec![StubRoute::new("GET", "/users/42", 200, json!({}))]).await;
    let app = create_test_app(Upstreams::default().user(&user.base_url))
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/users/42")
        .insert_header(("Authorization", bearer(&token_for("7", "seven@example.test"))))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_response(resp, 403, "FORBIDDEN", "Forbidden").await;
    assert!(user.requests().is_empty());

    user.stop().await;
}

#[actix_web::test]
async fn own_profile_is_forwarded_with_authorization() {
    let id = unique_user_id();
    let profile = json!({"id": id, "email": "me@example.test", "name": "Me"});
    let user = StubUpstream::start(vec![StubRoute::new(
        "GET",
        format!("/users/{id}"),
        200,
        profile.clone(),
    )])
    .await;
    let app = create_test_app(Upstreams::default().user(&user.base_url))
        .build()
        .await;

    let auth = bearer(&token_for(&id, "me@example.test"));
    let req = test::TestRequest::get()
        .uri(&format!("/users/{id}"))
        .insert_header(("Authorization", auth.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, profile);

    let seen = user.requests_to(&format!("/users/{id}"));
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].header("authorization"), Some(auth.as_str()));

    user.stop().await;
}

#[actix_web::test]
async fn numeric_id_claim_matches_path() {
    let user = StubUpstream::start(vec![StubRoute::new(
        "GET",
        "/users/42",
        200,
        json!({"id": 42}),
    )])
    .await;
    let app = create_test_app(Upstreams::default().user(&user.base_url))
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/users/42")
        .insert_header((
            "Authorization",
            bearer(&token_for_numeric_id(42, "n@example.test")),
        ))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);

    user.stop().await;
}

#[actix_web::test]
async fn update_keeps_method_and_body() {
    let user = StubUpstream::start(vec![StubRoute::new(
        "PUT",
        "/users/7",
        200,
        json!({"id": "7", "name": "New"}),
    )])
    .await;
    let app = create_test_app(Upstreams::default().user(&user.base_url))
        .build()
        .await;

    let req = test::TestRequest::put()
        .uri("/users/7")
        .insert_header(("Authorization", bearer(&token_for("7", "seven@example.test"))))
        .set_json(json!({"name": "New"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let seen = user.requests_to("/users/7");
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].method, "PUT");
    assert_eq!(seen[0].json(), json!({"name": "New"}));

    user.stop().await;
}

#[actix_web::test]
async fn upstream_not_found_is_relayed() {
    let user = StubUpstream::start(vec![]).await;
    let app = create_test_app(Upstreams::default().user(&user.base_url))
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/users/7")
        .insert_header(("Authorization", bearer(&token_for("7", "seven@example.test"))))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"error": "Not found"}));

    user.stop().await;
}

#[actix_web::test]
async fn unreachable_user_service_is_500() {
    let app = create_test_app(Upstreams::default()).build().await;

    let req = test::TestRequest::get()
        .uri("/users/7")
        .insert_header(("Authorization", bearer(&token_for("7", "seven@example.test"))))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_response(resp, 500, "UPSTREAM_UNREACHABLE", "User service error").await;
}

#[actix_web::test]
async fn encoded_user_id_stays_in_the_upstream_path() {
    let user = StubUpstream::start(vec![StubRoute::new(
        "GET",
        "/users/7%3Fadmin=1",
        200,
        json!({"id": "7?admin=1"}),
    )])
    .await;
    let app = create_test_app(Upstreams::default().user(&user.base_url))
        .build()
        .await;

    let req = test::TestRequest::get()
        .uri("/users/7%3Fadmin%3D1")
        .insert_header(("Authorization", bearer(&token_for("7?admin=1", "q@example.test"))))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);

    let seen = user.requests();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].path, "/users/7%3Fadmin=1");
    assert_eq!(seen[0].query, "");

    user.stop().await;
}
