//! User handlers.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{PatchField, User, UserPatch};

use super::parse_user_id;
use crate::api::extractors::ValidatedJson;
use crate::api::ndjson::NdJson;
use crate::api::state::AppState;

/// Partial update body. Absent fields are left untouched.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    #[schema(example = "timur")]
    pub name: Option<String>,
    #[schema(example = 31)]
    pub age: Option<i32>,
    #[validate(length(min = 1, message = "Gender cannot be empty"))]
    #[schema(example = "male")]
    pub gender: Option<String>,
    #[validate(length(min = 1, message = "Nation cannot be empty"))]
    #[schema(example = "TR")]
    pub nation: Option<String>,
}

impl From<UpdateUserRequest> for UserPatch {
    fn from(req: UpdateUserRequest) -> Self {
        UserPatch {
            name: req.name,
            age: req.age,
            gender: req.gender,
            nation: req.nation,
        }
    }
}

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/info/:id", get(get_user))
        .route("/create/", post(create_user_without_name))
        .route("/create/:name", post(create_user))
        .route("/:id/update", patch(update_user))
        .route("/:id/update/:field/:value", patch(update_user_field))
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "One user per line", body = [User], content_type = "application/x-ndjson"),
        (status = 500, description = "Database error")
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<NdJson> {
    let users = state.user_service.list_users().await?;
    NdJson::start(users).await
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/info/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User record", body = User),
        (status = 400, description = "Invalid user ID"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<User>> {
    let id = parse_user_id(&id)?;
    let user = state.user_service.get_user(id).await?;
    Ok(Json(user))
}

/// Enrich a name and store the new user
#[utoipa::path(
    post,
    path = "/create/{name}",
    tag = "Users",
    params(
        ("name" = String, Path, description = "Name to enrich")
    ),
    responses(
        (status = 204, description = "User created; Location points at the new record"),
        (status = 400, description = "Empty name"),
        (status = 502, description = "A demographic lookup failed")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<impl IntoResponse> {
    let user = state.user_service.create_user(name).await?;
    Ok((
        StatusCode::NO_CONTENT,
        [(header::LOCATION, format!("/info/{}", user.id))],
    ))
}

/// `POST /create/` carries no name to enrich.
async fn create_user_without_name() -> AppError {
    AppError::validation("Missing 'name'")
}

/// Update one field
#[utoipa::path(
    patch,
    path = "/{id}/update/{field}/{value}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID"),
        ("field" = String, Path, description = "One of name, age, gender, nation"),
        ("value" = String, Path, description = "New value")
    ),
    responses(
        (status = 204, description = "User updated"),
        (status = 400, description = "Unknown field or invalid value"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user_field(
    State(state): State<AppState>,
    Path((id, field, value)): Path<(String, String, String)>,
) -> AppResult<StatusCode> {
    let id = parse_user_id(&id)?;
    let field: PatchField = field.parse()?;
    let patch = UserPatch::single(field, &value)?;

    state.user_service.update_user(id, patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Update several fields from a JSON body
#[utoipa::path(
    patch,
    path = "/{id}/update",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 204, description = "User updated"),
        (status = 400, description = "Empty patch, unknown key or invalid value"),
        (status = 404, description = "User not found")
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> AppResult<StatusCode> {
    let id = parse_user_id(&id)?;
    let patch = UserPatch::from(req).normalized()?;

    state.user_service.update_user(id, patch).await?;
    Ok(StatusCode::NO_CONTENT)
}
