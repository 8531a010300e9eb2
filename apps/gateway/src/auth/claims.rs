//! Claims carried by user-service access tokens.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Identity of an authenticated user.
///
/// The user service may encode the id as a JSON string (document ids) or as
/// a number; both normalize to the same string form so that ownership checks
/// compare like with like.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when `raw` (e.g. a path segment) names this user.
    pub fn matches(&self, raw: &str) -> bool {
        self.0 == raw
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawUserId {
    Text(String),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawUserId::deserialize(deserializer)? {
            RawUserId::Text(s) => Ok(UserId(s)),
            RawUserId::Number(n) => Ok(UserId(n.to_string())),
        }
    }
}

/// Decoded access token claims, attached to request extensions by `GatewayAuth`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub id: UserId,
    pub email: String,
    /// Issued-at (seconds since epoch)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}
