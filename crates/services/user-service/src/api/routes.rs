//! Route configuration.

use std::time::Duration;

use axum::{error_handling::HandleErrorLayer, BoxError, Router};
use tower::{timeout::error::Elapsed, timeout::TimeoutLayer, ServiceBuilder};

use common::AppError;

use crate::api::handlers::{friend_routes, health_routes, user_routes};
use crate::api::openapi::openapi_routes;
use crate::api::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(openapi_routes())
        .merge(user_routes())
        .merge(friend_routes())
        .fallback(route_not_found)
        .with_state(state)
}

/// Bound every request by `timeout`.
///
/// A request that runs out of time gets the regular JSON error body with
/// `503 TIMEOUT`.
pub fn with_request_timeout(router: Router, timeout: Duration) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_middleware_error))
            .layer(TimeoutLayer::new(timeout)),
    )
}

async fn route_not_found() -> AppError {
    AppError::NotFound
}

async fn handle_middleware_error(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        tracing::warn!("Request exceeded its time budget");
        AppError::Timeout
    } else {
        AppError::internal(format!("middleware error: {err}"))
    }
}
