pub mod cors;
pub mod gateway_auth;
pub mod request_trace;
pub mod structured_logger;
pub mod trace_span;

pub use cors::cors_middleware;
pub use gateway_auth::GatewayAuth;
pub use request_trace::{RequestTrace, TraceId};
pub use structured_logger::StructuredLogger;
pub use trace_span::TraceSpan;
