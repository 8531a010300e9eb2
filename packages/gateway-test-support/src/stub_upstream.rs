//! Stub upstream services for gateway tests
//!
//! Each stub is a real actix `HttpServer` bound to an ephemeral localhost
//! port. It answers from a fixed table of canned replies and records every
//! request it receives, so tests can assert both what the gateway relayed
//! back and what it sent upstream (or that it sent nothing at all).

use std::collections::HashMap;
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};

/// One canned reply, matched on exact method and path.
#[derive(Debug, Clone)]
pub struct StubRoute {
    pub method: &'static str,
    pub path: String,
    pub status: u16,
    pub body: Value,
    pub delay: Option<Duration>,
}

impl StubRoute {
    pub fn new(method: &'static str, path: impl Into<String>, status: u16, body: Value) -> Self {
        Self {
            method,
            path: path.into(),
            status,
            body,
            delay: None,
        }
    }

    /// `GET /health → 200 {"status": "healthy"}`
    pub fn healthy() -> Self {
        Self::new("GET", "/health", 200, json!({"status": "healthy"}))
    }

    /// Hold the reply back for `delay` before answering.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// What the stub saw for one request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    /// Lowercase header name → value
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("recorded body should be JSON")
    }

    /// Decoded query pairs, in order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        web::Query::<Vec<(String, String)>>::from_query(&self.query)
            .map(web::Query::into_inner)
            .expect("recorded query should parse")
    }
}

struct StubState {
    routes: Vec<StubRoute>,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
}

pub struct StubUpstream {
    pub base_url: String,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: ServerHandle,
}

impl StubUpstream {
    /// Start a stub answering from `routes`. Unlisted requests get
    /// `404 {"error": "Not found"}`.
    ///
    /// Must be called from within an actix system (e.g. `#[actix_web::test]`).
    pub async fn start(routes: Vec<StubRoute>) -> Self {
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let state = web::Data::new(StubState {
            routes,
            recorded: Arc::clone(&recorded),
        });

        let server = HttpServer::new(move || {
            App::new()
                .app_data(state.clone())
                .default_service(web::to(answer))
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .expect("bind stub upstream");

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://{addr}"),
            recorded,
            handle,
        }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.recorded.lock().expect("stub lock").clone()
    }

    /// Requests received for `path`.
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

async fn answer(req: HttpRequest, body: web::Bytes, state: web::Data<StubState>) -> HttpResponse {
    let recorded = RecordedRequest {
        method: req.method().to_string(),
        path: req.path().to_string(),
        query: req.query_string().to_string(),
        headers: req
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect(),
        body: body.to_vec(),
    };
    tracing::debug!(method = %recorded.method, path = %recorded.path, "stub upstream request");
    state.recorded.lock().expect("stub lock").push(recorded);

    let route = state
        .routes
        .iter()
        .find(|r| r.method == req.method().as_str() && r.path == req.path());

    match route {
        Some(route) => {
            if let Some(delay) = route.delay {
                actix_web::rt::time::sleep(delay).await;
            }
            let status = StatusCode::from_u16(route.status).expect("valid stub status");
            HttpResponse::build(status).json(&route.body)
        }
        None => HttpResponse::NotFound().json(json!({"error": "Not found"})),
    }
}

/// Base URL of a localhost port that nothing listens on.
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind probe port");
    let port = listener.local_addr().expect("probe addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
