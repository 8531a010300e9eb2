//! Error codes for the gateway's own responses.
//!
//! Upstream error bodies are relayed untouched and never carry one of these
//! codes; every code here identifies a response the gateway produced itself.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for gateway-generated responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Missing or malformed Bearer credential
    Unauthorized,
    /// Bearer token failed signature or expiry verification
    InvalidToken,
    /// Authenticated principal does not own the resource
    Forbidden,

    // Request Validation
    /// General bad request error
    BadRequest,
    /// No route matched the request
    NotFound,

    // Upstream
    /// No response was received from an upstream service
    UpstreamUnreachable,
    /// The services health fan-out could not be assembled
    HealthAggregationFailed,

    // System Errors
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Forbidden => "FORBIDDEN",

            Self::BadRequest => "BAD_REQUEST",
            Self::NotFound => "NOT_FOUND",

            Self::UpstreamUnreachable => "UPSTREAM_UNREACHABLE",
            Self::HealthAggregationFailed => "HEALTH_AGGREGATION_FAILED",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
