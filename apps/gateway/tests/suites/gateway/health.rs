// Liveness and upstream health aggregation.

use std::time::Duration;

use actix_web::test;
use gateway_test_support::stub_upstream::{StubRoute, StubUpstream};
use serde_json::{json, Value};

use crate::support::{create_test_app, Upstreams};

#[actix_web::test]
async fn health_is_public_and_static() {
    let app = create_test_app(Upstreams::default()).build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"status": "healthy"}));
}

#[actix_web::test]
async fn health_ignores_invalid_credentials() {
    let app = create_test_app(Upstreams::default()).build().await;

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("Authorization", "Bearer garbage"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
}

#[actix_web::test]
async fn services_health_reports_each_upstream() {
    let ai = StubUpstream::start(vec![StubRoute::healthy()]).await;
    let user = StubUpstream::start(vec![StubRoute::healthy()]).await;
    let app = create_test_app(Upstreams::default().ai(&ai.base_url).user(&user.base_url))
        .build()
        .await;

    let req = test::TestRequest::get().uri("/services-health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({
            "notes-service": "down",
            "ai-service": "up",
            "user-service": "up",
        })
    );
    assert_eq!(ai.requests_to("/health").len(), 1);

    ai.stop().await;
    user.stop().await;
}

#[actix_web::test]
async fn unhealthy_or_erroring_upstreams_are_down() {
    let notes = StubUpstream::start(vec![StubRoute::new(
        "GET",
        "/health",
        200,
        json!({"status": "degraded"}),
    )])
    .await;
    let ai = StubUpstream::start(vec![StubRoute::new(
        "GET",
        "/health",
        503,
        json!({"status": "healthy"}),
    )])
    .await;
    let user = StubUpstream::start(vec![StubRoute::healthy()]).await;
    let app = create_test_app(
        Upstreams::default()
            .notes(&notes.base_url)
            .ai(&ai.base_url)
            .user(&user.base_url),
    )
    .build()
    .await;

    let req = test::TestRequest::get().uri("/services-health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["notes-service"], "down");
    assert_eq!(body["ai-service"], "down");
    assert_eq!(body["user-service"], "up");

    notes.stop().await;
    ai.stop().await;
    user.stop().await;
}

#[actix_web::test]
async fn slow_upstream_is_down_without_blocking_others() {
    let notes = StubUpstream::start(vec![StubRoute::healthy().delayed(Duration::from_secs(5))]).await;
    let ai = StubUpstream::start(vec![StubRoute::healthy()]).await;
    let user = StubUpstream::start(vec![StubRoute::healthy()]).await;
    let app = create_test_app(
        Upstreams::default()
            .notes(&notes.base_url)
            .ai(&ai.base_url)
            .user(&user.base_url),
    )
    .build()
    .await;

    let started = std::time::Instant::now();
    let req = test::TestRequest::get().uri("/services-health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(
        body,
        json!({
            "notes-service": "down",
            "ai-service": "up",
            "user-service": "up",
        })
    );

    notes.stop().await;
    ai.stop().await;
    user.stop().await;
}
