use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, DecodingKey, Validation};

use super::claims::Claims;
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Verify a user-service access token and return its claims.
///
/// Errors are always `AppError::InvalidToken` (403) with a reason:
/// - Expired token → `"token_expired"`
/// - Invalid signature → `"invalid_signature"`
/// - Any other decode error → `"invalid_token"`
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    // Default Validation already requires and checks exp; pin the algorithm.
    let validation = Validation::new(security.algorithm);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::invalid_token("token_expired"),
        ErrorKind::InvalidSignature => AppError::invalid_token("invalid_signature"),
        _ => AppError::invalid_token("invalid_token"),
    })
}
