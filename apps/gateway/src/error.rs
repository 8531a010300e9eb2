use actix_web::error::ResponseError;
use actix_web::http::{header, StatusCode};
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::errors::ErrorCode;
use crate::trace_ctx;
use crate::upstream::Upstream;

/// JSON body of every error the gateway produces itself.
///
/// Upstream services share the `error` field convention, so callers can read
/// `error` without knowing whether the gateway or an upstream answered.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Invalid token: {reason}")]
    InvalidToken { reason: &'static str },
    #[error("Forbidden")]
    Forbidden,
    #[error("Bad request: {detail}")]
    BadRequest { detail: String },
    #[error("Not found")]
    NotFound,
    #[error("{service} unreachable: {detail}")]
    UpstreamUnreachable {
        service: Upstream,
        message: &'static str,
        detail: String,
    },
    #[error("Health aggregation failed: {detail}")]
    AggregationFailure { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Unauthorized => ErrorCode::Unauthorized,
            AppError::InvalidToken { .. } => ErrorCode::InvalidToken,
            AppError::Forbidden => ErrorCode::Forbidden,
            AppError::BadRequest { .. } => ErrorCode::BadRequest,
            AppError::NotFound => ErrorCode::NotFound,
            AppError::UpstreamUnreachable { .. } => ErrorCode::UpstreamUnreachable,
            AppError::AggregationFailure { .. } => ErrorCode::HealthAggregationFailed,
            AppError::Internal { .. } => ErrorCode::Internal,
            AppError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// Message placed in the `error` field of the response body.
    pub fn message(&self) -> String {
        match self {
            AppError::Unauthorized => "Unauthorized".to_string(),
            AppError::InvalidToken { .. } => "Invalid token".to_string(),
            AppError::Forbidden => "Forbidden".to_string(),
            AppError::BadRequest { detail } => detail.clone(),
            AppError::NotFound => "Not found".to_string(),
            AppError::UpstreamUnreachable { message, .. } => message.to_string(),
            AppError::AggregationFailure { .. } => "Failed to check services health".to_string(),
            AppError::Internal { detail } => detail.clone(),
            AppError::Config { detail } => detail.clone(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken { .. } => StatusCode::FORBIDDEN,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::UpstreamUnreachable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::AggregationFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn unauthorized() -> Self {
        Self::Unauthorized
    }

    pub fn invalid_token(reason: &'static str) -> Self {
        Self::InvalidToken { reason }
    }

    pub fn forbidden() -> Self {
        Self::Forbidden
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest {
            detail: detail.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }

    pub fn upstream_unreachable(
        service: Upstream,
        message: &'static str,
        detail: impl Into<String>,
    ) -> Self {
        Self::UpstreamUnreachable {
            service,
            message,
            detail: detail.into(),
        }
    }

    pub fn aggregation_failure(detail: impl Into<String>) -> Self {
        Self::AggregationFailure {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::trace_id();

        let body = ErrorBody {
            error: self.message(),
            code: self.code().as_str().to_string(),
            trace_id: trace_id.clone(),
        };

        let mut builder = HttpResponse::build(status);
        builder.insert_header(("x-trace-id", trace_id));
        if status == StatusCode::UNAUTHORIZED {
            builder.insert_header((header::WWW_AUTHENTICATE, "Bearer"));
        }
        builder.json(body)
    }
}
