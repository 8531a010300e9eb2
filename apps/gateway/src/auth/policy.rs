//! Per-request authentication policy.
//!
//! Every request that reaches the protected part of the router starts out
//! unchecked and resolves to exactly one [`AuthDecision`]:
//!
//! - `Exempt`: path ends with `/health`, or is exactly `/auth/login` or
//!   `/auth/register`. Credentials are not inspected at all.
//! - `Rejected(401)`: no `Authorization` header, or not `Bearer <token>`.
//! - `Rejected(403)`: a bearer token that fails signature or expiry checks.
//! - `Authenticated`: claims decoded and ready for handlers.

use super::claims::Claims;
use super::jwt::verify_access_token;
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

const EXEMPT_EXACT: [&str; 2] = ["/auth/login", "/auth/register"];

#[derive(Debug)]
pub enum AuthDecision {
    Exempt,
    Authenticated(Claims),
    Rejected(AppError),
}

pub fn is_exempt(path: &str) -> bool {
    path.ends_with("/health") || EXEMPT_EXACT.contains(&path)
}

/// Pull the token out of an `Authorization` header value.
///
/// The header must be exactly `Bearer`, one space, and a token with no
/// whitespace in it. Tabs and repeated spaces are malformed.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AppError> {
    let value = header.ok_or_else(AppError::unauthorized)?;

    match value.split_once(' ') {
        Some(("Bearer", token))
            if !token.is_empty() && !token.contains(char::is_whitespace) =>
        {
            Ok(token)
        }
        _ => Err(AppError::unauthorized()),
    }
}

/// Resolve the auth state of one request.
///
/// `authorization` is `None` both when the header is absent and when it is
/// not valid UTF-8; either way the caller has not presented a usable credential.
pub fn evaluate(
    path: &str,
    authorization: Option<&str>,
    security: &SecurityConfig,
) -> AuthDecision {
    if is_exempt(path) {
        return AuthDecision::Exempt;
    }

    let token = match bearer_token(authorization) {
        Ok(token) => token,
        Err(e) => return AuthDecision::Rejected(e),
    };

    match verify_access_token(token, security) {
        Ok(claims) => AuthDecision::Authenticated(claims),
        Err(e) => AuthDecision::Rejected(e),
    }
}
