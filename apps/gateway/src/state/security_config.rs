use jsonwebtoken::Algorithm;

/// Shared-secret settings used to verify tokens issued by the user service.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Secret shared with the user service
    pub jwt_secret: Vec<u8>,
    /// Pinned verification algorithm (HS256, matching the user service)
    pub algorithm: Algorithm,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
        }
    }
}
