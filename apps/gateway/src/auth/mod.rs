pub mod claims;
pub mod jwt;
pub mod policy;

pub use claims::{Claims, UserId};
pub use jwt::verify_access_token;
pub use policy::{evaluate, is_exempt, AuthDecision};
