use actix_web::{web, HttpRequest, HttpResponse};
use bytes::Bytes;
use tracing::warn;

use crate::error::AppError;
use crate::extractors::auth_header::AuthHeader;
use crate::extractors::current_user::CurrentUser;
use crate::state::app_state::AppState;
use crate::upstream::target::outbound_method;
use crate::upstream::{ProxyTarget, Upstream};

/// Ownership-checked proxy for `/users/{id}`.
///
/// Only the user named in the token may touch their own profile; anyone else
/// gets 403 before the user service is contacted. This is the one upstream
/// that receives the caller's `Authorization` header, since the user service
/// re-verifies it.
async fn proxy_user(
    req: HttpRequest,
    path: web::Path<String>,
    user: CurrentUser,
    auth: AuthHeader,
    app_state: web::Data<AppState>,
    body: Bytes,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();

    if !user.id.matches(&user_id) {
        warn!(caller = %user.id, requested = %user_id, "user profile ownership check failed");
        return Err(AppError::forbidden());
    }

    let target = ProxyTarget::new(
        outbound_method(req.method())?,
        app_state
            .upstreams
            .segment_url(Upstream::User, &["users", user_id.as_str()])?,
    )
    .with_header("authorization", auth.0)
    .with_json_body(body);

    app_state
        .client
        .forward(Upstream::User, target, "User service error")
        .await?
        .into_http_response()
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/users/{id}", web::route().to(proxy_user));
}
