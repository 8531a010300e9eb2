//! HTTP client for the upstream services.
//!
//! Forwarding makes exactly one attempt. Any HTTP response, whatever its
//! status, is handed back for verbatim relay; only the absence of a response
//! (refused connection, DNS failure, timeout, truncated body) becomes an
//! [`AppError::UpstreamUnreachable`].

use std::time::Duration;

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use bytes::Bytes;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{ProxyTarget, ServiceStatus, Upstream};
use crate::error::AppError;
use crate::trace_ctx;

/// Status, content type and body of an upstream response.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl UpstreamResponse {
    /// Relay this response to the caller unchanged in status and body.
    pub fn into_http_response(self) -> Result<HttpResponse, AppError> {
        let status = StatusCode::from_u16(self.status).map_err(|_| {
            AppError::internal(format!("Upstream returned invalid status {}", self.status))
        })?;

        let mut builder = HttpResponse::build(status);
        if let Some(content_type) = self.content_type {
            builder.insert_header(("content-type", content_type));
        }
        Ok(builder.body(self.body))
    }
}

#[derive(Debug, Deserialize)]
struct HealthBody {
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
}

impl UpstreamClient {
    /// Build a pooled client; `timeout` bounds every forwarded request end to end.
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .tcp_keepalive(Duration::from_secs(30))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Send `target` to `upstream`.
    ///
    /// `unreachable_message` is what the caller sees in the `error` field when
    /// no response arrives.
    pub async fn forward(
        &self,
        upstream: Upstream,
        target: ProxyTarget,
        unreachable_message: &'static str,
    ) -> Result<UpstreamResponse, AppError> {
        let ProxyTarget {
            method,
            url,
            headers,
            body,
            query,
        } = target;

        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("x-request-id", trace_ctx::trace_id());

        if !query.is_empty() {
            request = request.query(&query);
        }
        for (name, value) in &headers {
            request = request.header(name.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        debug!(upstream = %upstream, %method, url = %url, "forwarding request");

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(upstream = %upstream, %method, url = %url, error = %e, "upstream request failed");
                return Err(AppError::upstream_unreachable(
                    upstream,
                    unreachable_message,
                    e.to_string(),
                ));
            }
        };

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.bytes().await.map_err(|e| {
            warn!(upstream = %upstream, url = %url, error = %e, "upstream body read failed");
            AppError::upstream_unreachable(upstream, unreachable_message, e.to_string())
        })?;

        info!(upstream = %upstream, %method, url = %url, upstream_status = status, "upstream responded");

        Ok(UpstreamResponse {
            status,
            content_type,
            body,
        })
    }

    /// Probe `{base_url}/health`.
    ///
    /// `up` only for a 2xx response whose JSON body has `status: "healthy"`;
    /// everything else, timeouts included, is `down`.
    pub async fn probe_health(
        &self,
        upstream: Upstream,
        base_url: &str,
        timeout: Duration,
    ) -> ServiceStatus {
        let url = format!("{base_url}/health");

        match self.fetch_health(&url, timeout).await {
            Ok(HealthBody { status: Some(status) }) if status == "healthy" => ServiceStatus::Up,
            Ok(body) => {
                warn!(upstream = %upstream, url = %url, status = ?body.status, "service reported unhealthy");
                ServiceStatus::Down
            }
            Err(e) => {
                warn!(upstream = %upstream, url = %url, error = %e, "service health check failed");
                ServiceStatus::Down
            }
        }
    }

    async fn fetch_health(&self, url: &str, timeout: Duration) -> Result<HealthBody, reqwest::Error> {
        self.client
            .get(url)
            .timeout(timeout)
            .send()
            .await?
            .error_for_status()?
            .json::<HealthBody>()
            .await
    }
}
