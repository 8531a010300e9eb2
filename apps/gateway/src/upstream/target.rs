use actix_web::http::Method as InboundMethod;
use bytes::Bytes;
use reqwest::Method;

use crate::error::AppError;

/// A fully resolved outbound request, built per inbound request and consumed
/// by [`UpstreamClient::forward`](super::UpstreamClient::forward).
#[derive(Debug, Clone)]
pub struct ProxyTarget {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
    pub query: Vec<(String, String)>,
}

impl ProxyTarget {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            query: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Attach a JSON body. Empty payloads are not sent.
    pub fn with_json_body(mut self, body: Bytes) -> Self {
        if body.is_empty() {
            return self;
        }
        self.headers
            .push(("content-type".to_string(), "application/json".to_string()));
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }
}

/// Translate the inbound actix method into the outbound client's method type.
pub fn outbound_method(method: &InboundMethod) -> Result<Method, AppError> {
    Method::from_bytes(method.as_str().as_bytes())
        .map_err(|e| AppError::bad_request(format!("Unsupported method {method}: {e}")))
}
