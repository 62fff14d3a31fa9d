//! OpenAPI documentation.

use axum::{response::Json, routing::get, Router};
use utoipa::OpenApi;

use crate::api::handlers::health_handler::{HealthResponse, ServiceHealth, ServiceStatus};
use crate::api::handlers::user_handler::UpdateUserRequest;
use crate::api::state::AppState;
use domain::User;

/// Path the OpenAPI document is served at
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::user_handler::list_users,
        crate::api::handlers::user_handler::get_user,
        crate::api::handlers::user_handler::create_user,
        crate::api::handlers::user_handler::update_user_field,
        crate::api::handlers::user_handler::update_user,
        crate::api::handlers::friend_handler::add_friend,
        crate::api::handlers::friend_handler::list_friends,
        crate::api::handlers::health_handler::health_check,
    ),
    components(
        schemas(
            User,
            UpdateUserRequest,
            HealthResponse,
            ServiceStatus,
            ServiceHealth,
        )
    ),
    tags(
        (name = "Users", description = "User records and enrichment"),
        (name = "Friends", description = "Symmetric friendships between users"),
        (name = "Health", description = "Liveness and dependency checks"),
    )
)]
pub struct ApiDoc;

/// Serve the generated document as JSON.
pub fn openapi_routes() -> Router<AppState> {
    Router::new().route(OPENAPI_PATH, get(|| async { Json(ApiDoc::openapi()) }))
}
