use std::future::{ready, Ready};

use actix_web::{dev::Payload, http::header, FromRequest, HttpRequest};

use crate::AppError;

/// The caller's `Authorization` header, verbatim, for relaying to the user
/// service.
#[derive(Debug, Clone)]
pub struct AuthHeader(pub String);

impl FromRequest for AuthHeader {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let value = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| AuthHeader(v.to_string()))
            .ok_or_else(AppError::unauthorized);
        ready(value)
    }
}
