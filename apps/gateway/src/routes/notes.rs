//! Identity-injecting proxy for the notes service.
//!
//! Notes belong to a user, and the notes service trusts the `user_id` it is
//! given. Reads and creates that do not name a user get the caller's id
//! filled in. The caller's `Authorization` header is not passed on.

use actix_web::{web, HttpRequest, HttpResponse};
use bytes::Bytes;
use reqwest::Method;
use serde_json::{Map, Value};

use crate::auth::claims::UserId;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::state::app_state::AppState;
use crate::upstream::{ProxyTarget, Upstream};

const USER_ID: &str = "user_id";

fn parse_query(query_string: &str) -> Result<Vec<(String, String)>, AppError> {
    web::Query::<Vec<(String, String)>>::from_query(query_string)
        .map(web::Query::into_inner)
        .map_err(|e| AppError::bad_request(format!("Invalid query string: {e}")))
}

/// Add `user_id=<id>` unless the query already names a user.
///
/// Empty `user_id` values count as absent and are replaced. Whitespace is a
/// value and is passed through.
pub fn inject_user_id_query(query: &mut Vec<(String, String)>, id: &UserId) {
    let named = query.iter().any(|(k, v)| k == USER_ID && !v.is_empty());
    if named {
        return;
    }
    query.retain(|(k, _)| k != USER_ID);
    query.push((USER_ID.to_string(), id.as_str().to_string()));
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Add `"user_id": "<id>"` to a JSON object body unless it already names a user.
///
/// An empty body is treated as `{}`. Anything other than a JSON object is a
/// bad request.
pub fn inject_user_id_body(body: &[u8], id: &UserId) -> Result<Bytes, AppError> {
    let mut object: Map<String, Value> = if body.iter().all(u8::is_ascii_whitespace) {
        Map::new()
    } else {
        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => map,
            Ok(_) => return Err(AppError::bad_request("Request body must be a JSON object")),
            Err(e) => return Err(AppError::bad_request(format!("Invalid JSON body: {e}"))),
        }
    };

    let named = object.get(USER_ID).is_some_and(|v| !is_blank(v));
    if !named {
        object.insert(USER_ID.to_string(), Value::String(id.as_str().to_string()));
    }

    serde_json::to_vec(&Value::Object(object))
        .map(Bytes::from)
        .map_err(|e| AppError::internal(format!("Failed to encode note body: {e}")))
}

async fn forward_notes(
    app_state: &AppState,
    target: ProxyTarget,
) -> Result<HttpResponse, AppError> {
    app_state
        .client
        .forward(Upstream::Notes, target, "Notes service error")
        .await?
        .into_http_response()
}

fn notes_url(app_state: &AppState, note_id: Option<&str>) -> Result<String, AppError> {
    match note_id {
        Some(id) => app_state
            .upstreams
            .segment_url(Upstream::Notes, &["notes", id]),
        None => Ok(app_state.upstreams.url(Upstream::Notes, "/notes")),
    }
}

async fn read(
    req: &HttpRequest,
    user: &CurrentUser,
    app_state: &AppState,
    note_id: Option<&str>,
) -> Result<HttpResponse, AppError> {
    let mut query = parse_query(req.query_string())?;
    inject_user_id_query(&mut query, &user.id);

    let target = ProxyTarget::new(Method::GET, notes_url(app_state, note_id)?).with_query(query);
    forward_notes(app_state, target).await
}

async fn list_notes(
    req: HttpRequest,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    read(&req, &user, &app_state, None).await
}

async fn create_note(
    user: CurrentUser,
    app_state: web::Data<AppState>,
    body: Bytes,
) -> Result<HttpResponse, AppError> {
    let body = inject_user_id_body(&body, &user.id)?;
    let target = ProxyTarget::new(Method::POST, notes_url(&app_state, None)?).with_json_body(body);
    forward_notes(&app_state, target).await
}

async fn get_note(
    req: HttpRequest,
    path: web::Path<String>,
    user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    read(&req, &user, &app_state, Some(path.as_str())).await
}

async fn update_note(
    path: web::Path<String>,
    _user: CurrentUser,
    app_state: web::Data<AppState>,
    body: Bytes,
) -> Result<HttpResponse, AppError> {
    let target = ProxyTarget::new(Method::PUT, notes_url(&app_state, Some(path.as_str()))?)
        .with_json_body(body);
    forward_notes(&app_state, target).await
}

async fn delete_note(
    path: web::Path<String>,
    _user: CurrentUser,
    app_state: web::Data<AppState>,
    body: Bytes,
) -> Result<HttpResponse, AppError> {
    let target = ProxyTarget::new(Method::DELETE, notes_url(&app_state, Some(path.as_str()))?)
        .with_json_body(body);
    forward_notes(&app_state, target).await
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/notes")
            .route(web::get().to(list_notes))
            .route(web::post().to(create_note)),
    )
    .service(
        web::resource("/notes/{id}")
            .route(web::get().to(get_note))
            .route(web::put().to(update_note))
            .route(web::delete().to(delete_note)),
    );
}
