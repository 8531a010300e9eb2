//! Access tokens shaped like the ones the user service issues:
//! HS256 over `{id, email, iat, exp}`.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes_only";

pub fn now_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_secs() as i64
}

/// Sign arbitrary claims with `secret`.
pub fn sign_claims(claims: &Value, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("encode test token")
}

/// One-hour token for `id` signed with [`TEST_SECRET`].
pub fn token_for(id: &str, email: &str) -> String {
    let now = now_secs();
    sign_claims(
        &json!({"id": id, "email": email, "iat": now, "exp": now + 3600}),
        TEST_SECRET,
    )
}

/// Token whose `id` claim is a JSON number.
pub fn token_for_numeric_id(id: u64, email: &str) -> String {
    let now = now_secs();
    sign_claims(
        &json!({"id": id, "email": email, "iat": now, "exp": now + 3600}),
        TEST_SECRET,
    )
}

/// Token for `id` that expired two hours ago.
pub fn expired_token_for(id: &str, email: &str) -> String {
    let now = now_secs();
    sign_claims(
        &json!({"id": id, "email": email, "iat": now - 3 * 3600, "exp": now - 2 * 3600}),
        TEST_SECRET,
    )
}

/// Well-formed token signed with a secret the gateway does not share.
pub fn foreign_token_for(id: &str, email: &str) -> String {
    let now = now_secs();
    sign_claims(
        &json!({"id": id, "email": email, "iat": now, "exp": now + 3600}),
        "some-other-secret",
    )
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
