//! Gateway test support utilities
//!
//! Shared by the gateway's unit and integration tests: logging bootstrap,
//! error-body assertions, token minting compatible with the user service, and
//! stub upstream services served over real sockets.

pub mod error_body;
pub mod logging;
pub mod stub_upstream;
pub mod tokens;
