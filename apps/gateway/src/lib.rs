#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;
pub mod upstream;

// Re-exports for public API
pub use auth::claims::{Claims, UserId};
pub use auth::jwt::verify_access_token;
pub use auth::policy::AuthDecision;
pub use config::gateway::{GatewayConfig, UpstreamUrls};
pub use error::AppError;
pub use errors::ErrorCode;
pub use extractors::current_user::CurrentUser;
pub use middleware::cors::cors_middleware;
pub use middleware::gateway_auth::GatewayAuth;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;
pub use upstream::{ProxyTarget, ServiceStatus, Upstream, UpstreamClient, UpstreamResponse};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    gateway_test_support::logging::init();
}
