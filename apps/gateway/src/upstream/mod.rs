//! Upstream services the gateway forwards to, and the client that talks to them.

use std::fmt;

use serde::Serialize;

pub mod client;
pub mod target;

pub use client::{UpstreamClient, UpstreamResponse};
pub use target::ProxyTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Upstream {
    Notes,
    Ai,
    User,
}

impl Upstream {
    pub const ALL: [Upstream; 3] = [Upstream::Notes, Upstream::Ai, Upstream::User];

    /// Key used for this service in the `/services-health` report.
    pub const fn service_name(&self) -> &'static str {
        match self {
            Upstream::Notes => "notes-service",
            Upstream::Ai => "ai-service",
            Upstream::User => "user-service",
        }
    }
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.service_name())
    }
}

/// Outcome of a single upstream health probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Up,
    Down,
}
