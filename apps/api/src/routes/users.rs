//! `/api/users`
//!
//! Registering a user is a write like any other and needs a signed-in
//! caller. The new user's token comes back in the `x-auth-token` response
//! header. The first administrator comes from the seed binary.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use reel_core::validation::validate_registration;
use reel_core::{CoreError, User, UserProfile};
use reel_db::repository::generate_id;
use reel_db::{hash_password, DbError};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::gate::{AuthUser, AUTH_TOKEN_HEADER};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// What registration reveals about the new user.
#[derive(Debug, Serialize)]
pub struct Registered {
    pub id: String,
    pub name: String,
    pub email: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(register))
        .route("/me", get(me))
}

/// Emails compare case-insensitively and are stored in this form.
pub(super) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

async fn register(
    AuthUser(identity): AuthUser,
    State(state): State<AppState>,
    body: Result<Json<RegisterBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = body?;
    validate_registration(&body.name, &body.email, &body.password)?;

    let user = User {
        id: generate_id(),
        name: body.name.trim().to_string(),
        email: normalize_email(&body.email),
        password_hash: hash_password(&body.password)?,
        is_admin: false,
        created_at: Utc::now(),
    };

    let user = match state.db.users().insert(&user).await {
        Ok(user) => user,
        Err(DbError::UniqueViolation { .. }) => {
            warn!(email = %user.email, "Registration rejected: email already registered");
            return Err(ApiError::bad_request("User already registered."));
        }
        Err(e) => return Err(e.into()),
    };

    let token = state
        .gate
        .verifier()
        .issue(&user.id, user.is_admin)
        .map_err(CoreError::from)?;

    info!(user_id = %user.id, registered_by = %identity.user_id, "User registered");
    Ok((
        [(AUTH_TOKEN_HEADER, token)],
        Json(Registered {
            id: user.id,
            name: user.name,
            email: user.email,
        }),
    ))
}

async fn me(
    AuthUser(identity): AuthUser,
    State(state): State<AppState>,
) -> Result<Json<UserProfile>, ApiError> {
    state
        .db
        .users()
        .get_by_id(&identity.user_id)
        .await?
        .map(|user| Json(UserProfile::from(&user)))
        .ok_or_else(|| ApiError::not_found("user"))
}
