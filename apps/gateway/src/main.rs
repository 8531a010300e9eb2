use actix_web::{web, App, HttpServer};
use gateway::config::gateway::GatewayConfig;
use gateway::middleware::cors::cors_middleware;
use gateway::middleware::request_trace::RequestTrace;
use gateway::middleware::structured_logger::StructuredLogger;
use gateway::middleware::trace_span::TraceSpan;
use gateway::routes;
use gateway::state::app_state::AppState;
use gateway::telemetry;
use tracing::{info, warn};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // A local .env is optional; real deployments set the environment directly.
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let config = match GatewayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Invalid gateway configuration: {e}");
            std::process::exit(1);
        }
    };

    if config.uses_default_secret() {
        warn!("JWT_SECRET is not set; using the development default");
    }

    let app_state = match AppState::new(&config) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ Failed to build application state: {e}");
            std::process::exit(1);
        }
    };

    info!(
        notes_service = %config.upstreams.notes,
        ai_service = %config.upstreams.ai,
        user_service = %config.upstreams.user,
        "upstream services configured"
    );
    info!("🚀 API Gateway listening on http://{}:{}", config.host, config.port);

    let data = web::Data::new(app_state);
    let cors_origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(cors_middleware(&cors_origins))
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
