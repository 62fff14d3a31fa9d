//! Friendship handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};

use common::AppResult;
use domain::User;

use super::parse_user_id;
use crate::api::ndjson::NdJson;
use crate::api::state::AppState;

/// Create friendship routes
pub fn friend_routes() -> Router<AppState> {
    Router::new()
        .route("/:id/add/:friend_id", post(add_friend))
        .route("/friends/:id", get(list_friends))
}

/// Make two users friends
#[utoipa::path(
    post,
    path = "/{id}/add/{friend_id}",
    tag = "Friends",
    params(
        ("id" = i32, Path, description = "User ID"),
        ("friend_id" = i32, Path, description = "ID of the new friend")
    ),
    responses(
        (status = 204, description = "Users are friends"),
        (status = 400, description = "Invalid ID or same user twice"),
        (status = 404, description = "User not found")
    )
)]
pub async fn add_friend(
    State(state): State<AppState>,
    Path((id, friend_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let id = parse_user_id(&id)?;
    let friend_id = parse_user_id(&friend_id)?;

    state.user_service.add_friend(id, friend_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// List a user's friends
#[utoipa::path(
    get,
    path = "/friends/{id}",
    tag = "Friends",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "One friend per line", body = [User], content_type = "application/x-ndjson"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Database error")
    )
)]
pub async fn list_friends(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<NdJson> {
    let id = parse_user_id(&id)?;
    let friends = state.user_service.list_friends(id).await?;
    NdJson::start(friends).await
}
