use actix_web::{web, HttpResponse};
use bytes::Bytes;
use reqwest::Method;

use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::state::app_state::AppState;
use crate::upstream::{ProxyTarget, Upstream};

/// Hand a note's text to the AI service for categorization.
async fn analyze(
    _user: CurrentUser,
    app_state: web::Data<AppState>,
    body: Bytes,
) -> Result<HttpResponse, AppError> {
    let target = ProxyTarget::new(Method::POST, app_state.upstreams.url(Upstream::Ai, "/analyze"))
        .with_json_body(body);

    app_state
        .client
        .forward(Upstream::Ai, target, "AI service error")
        .await?
        .into_http_response()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/analyze", web::post().to(analyze));
}
