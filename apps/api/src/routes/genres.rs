//! `/api/genres`

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use reel_core::validation::validate_genre_name;
use reel_core::Genre;
use reel_db::repository::generate_id;
use serde::Deserialize;
use tracing::info;

use super::parse_id;
use crate::error::ApiError;
use crate::gate::{AdminUser, AuthUser};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenreBody {
    #[serde(default)]
    pub name: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_one).put(update).delete(remove))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<Genre>>, ApiError> {
    Ok(Json(state.db.genres().list().await?))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Genre>, ApiError> {
    let id = parse_id("genre", &id)?;
    state
        .db
        .genres()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("genre"))
}

async fn create(
    AuthUser(identity): AuthUser,
    State(state): State<AppState>,
    body: Result<Json<GenreBody>, JsonRejection>,
) -> Result<Json<Genre>, ApiError> {
    let Json(body) = body?;
    validate_genre_name(&body.name)?;

    let genre = state
        .db
        .genres()
        .insert(&Genre {
            id: generate_id(),
            name: body.name.trim().to_string(),
        })
        .await?;

    info!(genre_id = %genre.id, user_id = %identity.user_id, "Genre created");
    Ok(Json(genre))
}

async fn update(
    AuthUser(_): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<GenreBody>, JsonRejection>,
) -> Result<Json<Genre>, ApiError> {
    let id = parse_id("genre", &id)?;
    let Json(body) = body?;
    validate_genre_name(&body.name)?;

    let genre = Genre {
        id: id.to_string(),
        name: body.name.trim().to_string(),
    };
    state.db.genres().update(&genre).await?;
    Ok(Json(genre))
}

async fn remove(
    AdminUser(identity): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Genre>, ApiError> {
    let id = parse_id("genre", &id)?;
    let genre = state.db.genres().delete(id).await?;

    info!(genre_id = %genre.id, user_id = %identity.user_id, "Genre deleted");
    Ok(Json(genre))
}
