//! Unique test data for gateway tests
//!
//! Values are derived from ULIDs so concurrent tests against shared stub
//! services never collide.

use ulid::Ulid;

/// Unique email in the format `{prefix}-{ulid}@example.test`
///
/// # Examples
/// ```
/// use test_support::unique_email;
///
/// let a = unique_email("register");
/// let b = unique_email("register");
/// assert_ne!(a, b);
/// assert!(a.ends_with("@example.test"));
/// ```
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.test", prefix.to_lowercase(), Ulid::new())
}

/// Unique user id shaped like a document-store object id: 24 lowercase hex
/// characters.
///
/// # Examples
/// ```
/// use test_support::unique_user_id;
///
/// let id = unique_user_id();
/// assert_eq!(id.len(), 24);
/// assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
pub fn unique_user_id() -> String {
    let bytes = Ulid::new().to_bytes();
    bytes[4..].iter().map(|b| format!("{b:02x}")).collect()
}
