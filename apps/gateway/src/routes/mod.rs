//! The gateway's HTTP surface.
//!
//! Registration order is significant. The public routes (`/health`,
//! `/services-health`, `/auth/*`) are registered first and never see the auth
//! layer. Everything else, including paths no route matches, falls into a
//! catch-all scope wrapped by [`GatewayAuth`], so an unknown path answers 401
//! to anonymous callers and 404 to authenticated ones.

use actix_web::web;

use crate::error::AppError;
use crate::middleware::gateway_auth::GatewayAuth;

pub mod analyze;
pub mod auth;
pub mod health;
pub mod notes;
pub mod users;

async fn not_found() -> Result<actix_web::HttpResponse, AppError> {
    Err(AppError::not_found())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(auth::configure_routes);

    cfg.service(
        web::scope("")
            .configure(users::configure_routes)
            .configure(notes::configure_routes)
            .configure(analyze::configure_routes)
            .default_service(web::to(not_found))
            .wrap(GatewayAuth),
    );
}
