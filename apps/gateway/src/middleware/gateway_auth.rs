//! Authentication middleware for the protected part of the router.
//!
//! Applies [`auth::policy::evaluate`](crate::auth::policy::evaluate) to every
//! request it wraps. Exempt requests pass through untouched, authenticated
//! requests get their [`Claims`](crate::auth::claims::Claims) stored in request
//! extensions, and rejected requests are answered here without reaching a
//! handler.
//!
//! The decision runs inside the returned future so that the error response is
//! rendered within the request's trace scope.

use std::rc::Rc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::{debug, warn};

use crate::auth::policy::{evaluate, AuthDecision};
use crate::error::AppError;
use crate::state::app_state::AppState;

pub struct GatewayAuth;

impl<S, B> Transform<S, ServiceRequest> for GatewayAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = GatewayAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(GatewayAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct GatewayAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for GatewayAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let app_state = match req.app_data::<web::Data<AppState>>() {
                Some(state) => state.clone(),
                None => {
                    let err = AppError::internal("AppState not available");
                    return Ok(req.error_response(err).map_into_right_body());
                }
            };

            let authorization = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);

            let decision = evaluate(req.path(), authorization.as_deref(), &app_state.security);
            match decision {
                AuthDecision::Exempt => {
                    debug!(path = %req.path(), "auth exempt");
                }
                AuthDecision::Authenticated(claims) => {
                    req.extensions_mut().insert(claims);
                }
                AuthDecision::Rejected(err) => {
                    warn!(path = %req.path(), error = %err, "request rejected by auth policy");
                    return Ok(req.error_response(err).map_into_right_body());
                }
            }

            service.call(req).await.map(|res| res.map_into_left_body())
        })
    }
}
