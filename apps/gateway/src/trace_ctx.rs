//! Task-local trace context for gateway requests.
//!
//! `RequestTrace` opens the scope; error responses and upstream forwarding read
//! the current id from here so that the `x-trace-id` header, the error body and
//! the outbound `x-request-id` header all agree.

use tokio::task_local;

task_local! {
    static TRACE_ID: String;
}

const UNKNOWN: &str = "unknown";

/// Trace id of the request being processed on this task, or `"unknown"`
/// outside of a request scope.
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|id| id.clone())
        .unwrap_or_else(|_| UNKNOWN.to_string())
}

/// Run `future` with `trace_id` installed as the task-local trace id.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(trace_id, future).await
}
