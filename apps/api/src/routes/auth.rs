//! `/api/auth`

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use reel_core::validation::{validate_email, validate_password};
use reel_core::CoreError;
use reel_db::verify_password;
use serde::Deserialize;
use tracing::{info, warn};

use super::users::normalize_email;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(login))
}

/// Exchanges email and password for a token, returned as the plain body.
///
/// Unknown email and wrong password get the same answer.
async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginBody>, JsonRejection>,
) -> Result<String, ApiError> {
    let Json(body) = body?;
    validate_email(&body.email)?;
    validate_password(&body.password)?;

    let email = normalize_email(&body.email);
    let user = match state.db.users().get_by_email(&email).await? {
        Some(user) if verify_password(&body.password, &user.password_hash) => user,
        _ => {
            warn!(email = %email, "Login rejected");
            return Err(CoreError::InvalidCredentials.into());
        }
    };

    let token = state
        .gate
        .verifier()
        .issue(&user.id, user.is_admin)
        .map_err(CoreError::from)?;

    info!(user_id = %user.id, "User logged in");
    Ok(token)
}
