mod analyze;
mod auth_policy;
mod fallback;
mod health;
mod users;
