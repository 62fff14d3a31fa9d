//! HTTP surface of the user service.

pub mod extractors;
pub mod handlers;
pub mod ndjson;
pub mod openapi;
pub mod routes;
pub mod state;

pub use routes::{create_router, with_request_timeout};
pub use state::AppState;
