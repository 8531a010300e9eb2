//! Assertions for the gateway's JSON error contract
//!
//! Gateway-generated errors look like
//! `{"error": "...", "code": "...", "trace_id": "..."}` with an `x-trace-id`
//! header equal to `trace_id`. These helpers do not depend on gateway types.

use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::HeaderMap;
use actix_web::http::StatusCode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ErrorBodyLike {
    error: String,
    code: String,
    trace_id: String,
}

/// Assert that raw response parts carry a gateway error.
pub fn assert_error_parts(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
    expected_status: u16,
    expected_code: &str,
    expected_error: &str,
) {
    assert_eq!(status.as_u16(), expected_status);

    let parsed: ErrorBodyLike = serde_json::from_slice(body).unwrap_or_else(|e| {
        panic!(
            "Response body should be a gateway error ({e}): {}",
            String::from_utf8_lossy(body)
        )
    });

    let trace_header = headers
        .get("x-trace-id")
        .expect("x-trace-id header should be present")
        .to_str()
        .expect("x-trace-id header should be valid UTF-8");
    assert_eq!(
        parsed.trace_id, trace_header,
        "trace_id in body should match x-trace-id header"
    );

    assert_eq!(parsed.code, expected_code);
    assert_eq!(parsed.error, expected_error);
}

/// Assert that a service response carries a gateway error, consuming it.
pub async fn assert_error_response(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
    expected_error: &str,
) {
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = actix_web::test::read_body(resp).await;

    assert_error_parts(
        status,
        &headers,
        &body,
        expected_status,
        expected_code,
        expected_error,
    );
}
