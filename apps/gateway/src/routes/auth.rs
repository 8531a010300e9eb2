//! Credential delegation to the user service.
//!
//! The gateway neither issues nor stores credentials: register and login
//! bodies go to the user service verbatim and its answer, success or
//! failure, comes back verbatim.

use actix_web::{web, HttpResponse};
use bytes::Bytes;
use reqwest::Method;

use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::upstream::{ProxyTarget, Upstream};

async fn delegate(
    app_state: &AppState,
    path: &str,
    body: Bytes,
    unreachable_message: &'static str,
) -> Result<HttpResponse, AppError> {
    let target =
        ProxyTarget::new(Method::POST, app_state.upstreams.url(Upstream::User, path)).with_json_body(body);

    app_state
        .client
        .forward(Upstream::User, target, unreachable_message)
        .await?
        .into_http_response()
}

async fn register(app_state: web::Data<AppState>, body: Bytes) -> Result<HttpResponse, AppError> {
    delegate(&app_state, "/users/register", body, "Failed to register user").await
}

async fn login(app_state: web::Data<AppState>, body: Bytes) -> Result<HttpResponse, AppError> {
    delegate(&app_state, "/users/login", body, "Failed to login").await
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/auth/register", web::post().to(register))
        .route("/auth/login", web::post().to(login));
}
