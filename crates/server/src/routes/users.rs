use axum::{
    body::Bytes,
    extract::{Path, State},
};
use serde::Serialize;
use service::users::{User, UserInput};
use tracing::info;

use crate::errors::ApiError;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Wire shape of a user: the store key plus the record fields.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub biography: String,
}

impl UserResponse {
    fn new(id: String, user: User) -> Self {
        Self {
            id,
            first_name: user.first_name,
            last_name: user.last_name,
            biography: user.biography,
        }
    }
}

/// Decode and validate a create/update body.
///
/// The body is read as JSON whatever the `Content-Type` says; anything that is
/// not a JSON object is a malformed request.
fn parse_user(body: &[u8]) -> Result<User, ApiError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(ApiError::MalformedRequest);
    }
    let input: UserInput = serde_json::from_value(value)?;
    Ok(input.into_user()?)
}

/// `POST /api/users`: returns the new id with 201.
pub async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<ApiResponse<String>, ApiError> {
    let user = parse_user(&body)?;
    let id = state.users.create(user).await;
    info!(%id, "user created");
    Ok(ApiResponse::created(id))
}

/// `GET /api/users`: every stored user, in no particular order.
pub async fn list_users(State(state): State<AppState>) -> ApiResponse<Vec<UserResponse>> {
    let users = state
        .users
        .list()
        .await
        .into_iter()
        .map(|(id, user)| UserResponse::new(id, user))
        .collect();
    ApiResponse::ok(users)
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    let user = state.users.get_by_id(&id).await?;
    Ok(ApiResponse::ok(UserResponse::new(id, user)))
}

/// `PUT /api/users/:id`: replaces all fields; unknown ids are 404.
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<ApiResponse<UserResponse>, ApiError> {
    let user = parse_user(&body)?;
    let updated = state.users.update(&id, user).await?;
    info!(%id, "user updated");
    Ok(ApiResponse::ok(UserResponse::new(id, updated)))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<String>, ApiError> {
    state.users.delete(&id).await?;
    info!(%id, "user deleted");
    Ok(ApiResponse::ok(format!("id {id} deleted")))
}
