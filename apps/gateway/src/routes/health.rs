use std::collections::BTreeMap;
use std::time::Duration;

use actix_web::{web, HttpResponse};
use futures::future::join_all;
use serde::Serialize;

use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::upstream::{ServiceStatus, Upstream};

/// Per-probe timeout for `/services-health`.
pub const HEALTH_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse { status: "healthy" })
}

/// Probe every upstream concurrently and report `up`/`down` per service.
///
/// Probes settle independently; one slow or failing upstream only marks
/// itself `down`.
async fn services_health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let probes = Upstream::ALL.map(|upstream| {
        let client = &app_state.client;
        let base_url = app_state.upstreams.base_url(upstream);
        async move {
            let status = client
                .probe_health(upstream, base_url, HEALTH_PROBE_TIMEOUT)
                .await;
            (upstream.service_name(), status)
        }
    });

    let report: BTreeMap<&'static str, ServiceStatus> = join_all(probes).await.into_iter().collect();

    let body = serde_json::to_value(&report).map_err(|e| AppError::aggregation_failure(e.to_string()))?;

    Ok(HttpResponse::Ok().json(body))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .route("/services-health", web::get().to(services_health));
}
