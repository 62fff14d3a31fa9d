//! HTTP handlers.

pub mod friend_handler;
pub mod health_handler;
pub mod user_handler;

pub use friend_handler::friend_routes;
pub use health_handler::health_routes;
pub use user_handler::user_routes;

use common::{AppError, AppResult};

/// Parse a user ID path segment.
pub(crate) fn parse_user_id(raw: &str) -> AppResult<i32> {
    raw.trim()
        .parse()
        .map_err(|_| AppError::validation(format!("Invalid user id '{raw}'")))
}
