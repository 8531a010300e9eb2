use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::auth::claims::{Claims, UserId};
use crate::error::AppError;

/// The authenticated caller, read from the claims `GatewayAuth` stored in
/// request extensions.
///
/// Requests that were exempt from authentication carry no claims, so a
/// handler that needs an identity answers them with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.id,
            email: claims.email,
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        ready(claims.map(CurrentUser::from).ok_or_else(AppError::unauthorized))
    }
}
