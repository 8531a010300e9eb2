// Authenticated forwarding to the AI service.

use actix_web::test;
use gateway_test_support::error_body::assert_error_response;
use gateway_test_support::stub_upstream::{StubRoute, StubUpstream};
use gateway_test_support::tokens::{bearer, token_for};
use serde_json::{json, Value};

use crate::support::{create_test_app, Upstreams};

#[actix_web::test]
async fn analysis_is_forwarded_verbatim() {
    let analysis = json!({"sentiment": "positive", "summary": "Nice", "keywords": ["nice"]});
    let ai = StubUpstream::start(vec![StubRoute::new(
        "POST",
        "/analyze",
        200,
        analysis.clone(),
    )])
    .await;
    let app = create_test_app(Upstreams::default().ai(&ai.base_url))
        .build()
        .await;

    let payload = json!({"text": "What a nice day"});
    let req = test::TestRequest::post()
        .uri("/analyze")
        .insert_header(("Authorization", bearer(&token_for("7", "a@example.test"))))
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, analysis);

    let seen = ai.requests_to("/analyze");
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].json(), payload);
    assert!(seen[0].header("authorization").is_none());

    ai.stop().await;
}

#[actix_web::test]
async fn ai_validation_errors_are_relayed() {
    let ai = StubUpstream::start(vec![StubRoute::new(
        "POST",
        "/analyze",
        422,
        json!({"detail": "text is required"}),
    )])
    .await;
    let app = create_test_app(Upstreams::default().ai(&ai.base_url))
        .build()
        .await;

    let req = test::TestRequest::post()
        .uri("/analyze")
        .insert_header(("Authorization", bearer(&token_for("7", "a@example.test"))))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status().as_u16(), 422);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"detail": "text is required"}));

    ai.stop().await;
}

#[actix_web::test]
async fn unreachable_ai_service_is_500() {
    let app = create_test_app(Upstreams::default()).build().await;

    let req = test::TestRequest::post()
        .uri("/analyze")
        .insert_header(("Authorization", bearer(&token_for("7", "a@example.test"))))
        .set_json(json!({"text": "hello"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_error_response(resp, 500, "UPSTREAM_UNREACHABLE", "AI service error").await;
}
