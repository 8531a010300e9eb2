use super::security_config::SecurityConfig;
use crate::config::gateway::{GatewayConfig, UpstreamUrls};
use crate::error::AppError;
use crate::upstream::UpstreamClient;

/// Per-process gateway state, shared read-only by every worker.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Token verification settings
    pub security: SecurityConfig,
    /// Where each upstream lives
    pub upstreams: UpstreamUrls,
    /// Pooled HTTP client used for forwarding and health probes
    pub client: UpstreamClient,
}

impl AppState {
    /// Build state from a loaded configuration.
    pub fn new(config: &GatewayConfig) -> Result<Self, AppError> {
        let client = UpstreamClient::new(config.upstream_timeout)?;
        Ok(Self::with_client(config.security(), config.upstreams.clone(), client))
    }

    pub fn with_client(
        security: SecurityConfig,
        upstreams: UpstreamUrls,
        client: UpstreamClient,
    ) -> Self {
        Self {
            security,
            upstreams,
            client,
        }
    }
}
