//! Gateway configuration loaded from the environment.
//!
//! Every setting has a default so the gateway starts against a local
//! docker-compose style layout with no environment at all. Values are read
//! once at startup into a [`GatewayConfig`] which is then handed to the
//! application state; nothing reads the environment after that.

use std::time::Duration;

use crate::error::AppError;
use crate::state::security_config::SecurityConfig;
use crate::upstream::Upstream;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_NOTES_SERVICE_URL: &str = "http://localhost:8001";
pub const DEFAULT_AI_SERVICE_URL: &str = "http://localhost:8002";
pub const DEFAULT_USER_SERVICE_URL: &str = "http://localhost:8003";
pub const DEFAULT_JWT_SECRET: &str = "your_jwt_secret_key";
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

/// Base URLs of the three upstream services, without trailing slashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamUrls {
    pub notes: String,
    pub ai: String,
    pub user: String,
}

impl UpstreamUrls {
    pub fn new(
        notes: impl Into<String>,
        ai: impl Into<String>,
        user: impl Into<String>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            notes: normalize_base_url("NOTES_SERVICE_URL", notes.into())?,
            ai: normalize_base_url("AI_SERVICE_URL", ai.into())?,
            user: normalize_base_url("USER_SERVICE_URL", user.into())?,
        })
    }

    pub fn base_url(&self, upstream: Upstream) -> &str {
        match upstream {
            Upstream::Notes => &self.notes,
            Upstream::Ai => &self.ai,
            Upstream::User => &self.user,
        }
    }

    /// Absolute URL for `path` (which must start with `/`) on `upstream`.
    pub fn url(&self, upstream: Upstream, path: &str) -> String {
        format!("{}{}", self.base_url(upstream), path)
    }

    /// Absolute URL on `upstream` built from raw path segments.
    ///
    /// Each segment is percent-encoded on its own, so a decoded caller value
    /// such as `n1?user_id=x` stays one path segment and never leaks into
    /// the query or fragment.
    pub fn segment_url(&self, upstream: Upstream, segments: &[&str]) -> Result<String, AppError> {
        let base = self.base_url(upstream);
        let mut url = reqwest::Url::parse(base)
            .map_err(|e| AppError::internal(format!("Invalid {upstream} base URL {base}: {e}")))?;

        url.path_segments_mut()
            .map_err(|_| AppError::internal(format!("{upstream} base URL {base} cannot take a path")))?
            .pop_if_empty()
            .extend(segments);

        Ok(url.into())
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub upstreams: UpstreamUrls,
    pub jwt_secret: String,
    /// Overall timeout applied to every forwarded request
    pub upstream_timeout: Duration,
    /// Browser origins allowed by CORS; empty means the localhost fallback
    pub cors_allowed_origins: Vec<String>,
}

impl GatewayConfig {
    /// Build configuration from process environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = get("GATEWAY_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match get("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| AppError::config(format!("PORT must be a valid port number, got {raw:?}")))?,
            None => DEFAULT_PORT,
        };

        let upstreams = UpstreamUrls::new(
            get("NOTES_SERVICE_URL").unwrap_or_else(|| DEFAULT_NOTES_SERVICE_URL.to_string()),
            get("AI_SERVICE_URL").unwrap_or_else(|| DEFAULT_AI_SERVICE_URL.to_string()),
            get("USER_SERVICE_URL").unwrap_or_else(|| DEFAULT_USER_SERVICE_URL.to_string()),
        )?;

        let jwt_secret = get("JWT_SECRET").unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string());

        let timeout_secs = match get("UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(AppError::config(format!(
                        "UPSTREAM_TIMEOUT_SECS must be a positive integer, got {raw:?}"
                    )))
                }
            },
            None => DEFAULT_UPSTREAM_TIMEOUT_SECS,
        };

        // Comma-separated, e.g. http://localhost:3000,https://notes.example.com
        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty() && *s != "null")
                    .filter(|s| s.starts_with("http://") || s.starts_with("https://"))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            upstreams,
            jwt_secret,
            upstream_timeout: Duration::from_secs(timeout_secs),
            cors_allowed_origins,
        })
    }

    pub fn security(&self) -> SecurityConfig {
        SecurityConfig::new(self.jwt_secret.as_bytes())
    }

    pub fn uses_default_secret(&self) -> bool {
        self.jwt_secret == DEFAULT_JWT_SECRET
    }
}

fn normalize_base_url(key: &str, raw: String) -> Result<String, AppError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(AppError::config(format!(
            "{key} must be an http:// or https:// URL, got {raw:?}"
        )));
    }
    Ok(trimmed.to_string())
}
