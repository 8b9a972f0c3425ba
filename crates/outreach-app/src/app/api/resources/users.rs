use salvo::writing::Json;
use salvo::{Depot, Request, Router, handler};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use outreach_db::db::query;
use outreach_db::model::user::{NewUser, User, UserChanges};
use outreach_service::auth::password::hash_password;

use super::{MessageResponse, Page, path_id, require_non_empty};
use crate::db_handler::get_db_from_depot;
use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl UserCreate {
    fn validate(&self) -> AppResult<()> {
        require_non_empty(&self.email, "email")?;
        require_non_empty(&self.username, "username")?;
        require_non_empty(&self.first_name, "first_name")?;
        require_non_empty(&self.last_name, "last_name")?;
        require_non_empty(&self.password, "password")
    }
}

/// Partial update: absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UserUpdate {
    fn into_changes(self) -> UserChanges {
        UserChanges {
            email: self.email,
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            ..UserChanges::default()
        }
    }
}

/// Wire projection of a stored user. The hashed password and the activity
/// flags stay server-side.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub user_id: String,
    pub email: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id.to_string(),
            email: user.email,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

#[handler]
async fn list_users(req: &mut Request, depot: &mut Depot) -> AppResult<Json<Vec<UserResponse>>> {
    let page = Page::from_request(req)?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let users = query::user::list(&mut conn, page.skip, page.limit).await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

#[handler]
async fn create_user(req: &mut Request, depot: &mut Depot) -> AppResult<Json<UserResponse>> {
    let payload: UserCreate = req
        .parse_json()
        .await
        .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;
    payload.validate()?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    // Pre-checked duplicate email reads as a validation failure (400);
    // the unique index remains the arbiter for concurrent creates.
    if query::user::find_by_email(&mut conn, &payload.email)
        .await?
        .is_some()
    {
        return Err(AppError::validation("Email already registered"));
    }

    let hashed_password = hash_password(&payload.password)?;

    let user = query::user::insert(
        &mut conn,
        NewUser {
            id: Uuid::new_v4(),
            email: &payload.email,
            username: &payload.username,
            first_name: &payload.first_name,
            last_name: &payload.last_name,
            hashed_password: &hashed_password,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, email = %user.email, "User created");

    Ok(Json(user.into()))
}

#[handler]
async fn get_user(req: &mut Request, depot: &mut Depot) -> AppResult<Json<UserResponse>> {
    let id = path_id(req, "user_id", "User")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let user = query::user::find(&mut conn, id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(user.into()))
}

#[handler]
async fn update_user(req: &mut Request, depot: &mut Depot) -> AppResult<Json<UserResponse>> {
    let id = path_id(req, "user_id", "User")?;
    let payload: UserUpdate = req
        .parse_json()
        .await
        .map_err(|e| AppError::validation(format!("Invalid request body: {e}")))?;

    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    let changes = payload.into_changes();

    // An empty update is a no-op read, not an error.
    let user = if changes.is_empty() {
        query::user::find(&mut conn, id).await?
    } else {
        query::user::update(&mut conn, id, &changes).await?
    }
    .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(user.into()))
}

#[handler]
async fn delete_user(req: &mut Request, depot: &mut Depot) -> AppResult<Json<MessageResponse>> {
    let id = path_id(req, "user_id", "User")?;
    let provider = get_db_from_depot(depot)?;
    let mut conn = provider.get_connection().await?;

    if !query::user::delete(&mut conn, id).await? {
        return Err(AppError::not_found("User not found"));
    }

    Ok(Json(MessageResponse {
        message: "User deleted successfully".to_string(),
    }))
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path("users")
        .get(list_users)
        .post(create_user)
        .push(
            Router::with_path("{user_id}")
                .get(get_user)
                .put(update_user)
                .delete(delete_user),
        )
}
