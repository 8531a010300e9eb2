pub mod auth_header;
pub mod current_user;

pub use auth_header::AuthHeader;
pub use current_user::CurrentUser;
