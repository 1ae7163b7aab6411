//! `/api/movies`
//!
//! Stock set here is an absolute count. Rentals move it only through the
//! inventory ledger; an update writes the catalog fields and the count in
//! one unit of work.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use reel_core::validation::{
    validate_daily_rental_rate_cents, validate_movie_title, validate_number_in_stock,
};
use reel_core::{CoreError, Money, Movie};
use reel_db::repository::generate_id;
use serde::Deserialize;
use tracing::info;

use super::parse_id;
use crate::error::ApiError;
use crate::gate::{AdminUser, AuthUser};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieBody {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub genre_id: String,
    #[serde(default)]
    pub number_in_stock: i64,
    #[serde(default)]
    pub daily_rental_rate_cents: i64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_one).put(update).delete(remove))
}

/// Validates the body and resolves the genre into a snapshot.
async fn build_movie(state: &AppState, id: String, body: MovieBody) -> Result<Movie, ApiError> {
    validate_movie_title(&body.title)?;
    validate_number_in_stock(body.number_in_stock)?;
    validate_daily_rental_rate_cents(body.daily_rental_rate_cents)?;

    let genre = match parse_id("genre", &body.genre_id) {
        Ok(genre_id) => state.db.genres().get_by_id(genre_id).await?,
        Err(_) => None,
    }
    .ok_or_else(|| CoreError::InvalidGenre(body.genre_id.clone()))?;

    Ok(Movie {
        id,
        title: body.title.trim().to_string(),
        genre: (&genre).into(),
        number_in_stock: body.number_in_stock,
        daily_rental_rate: Money::from_cents(body.daily_rental_rate_cents),
    })
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<Movie>>, ApiError> {
    Ok(Json(state.db.movies().list().await?))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    let id = parse_id("movie", &id)?;
    state
        .db
        .movies()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("movie"))
}

async fn create(
    AuthUser(identity): AuthUser,
    State(state): State<AppState>,
    body: Result<Json<MovieBody>, JsonRejection>,
) -> Result<Json<Movie>, ApiError> {
    let Json(body) = body?;
    let movie = build_movie(&state, generate_id(), body).await?;
    let movie = state.db.movies().insert(&movie).await?;

    info!(
        movie_id = %movie.id,
        stock = movie.number_in_stock,
        user_id = %identity.user_id,
        "Movie created"
    );
    Ok(Json(movie))
}

async fn update(
    AuthUser(identity): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<MovieBody>, JsonRejection>,
) -> Result<Json<Movie>, ApiError> {
    let id = parse_id("movie", &id)?;
    let Json(body) = body?;
    let movie = build_movie(&state, id.to_string(), body).await?;

    let mut uow = state.db.begin().await?;
    state.db.movies().update_details(&mut uow, &movie).await?;
    state
        .db
        .ledger()
        .restock(&mut uow, &movie.id, movie.number_in_stock)
        .await?;
    uow.commit().await?;

    info!(
        movie_id = %movie.id,
        stock = movie.number_in_stock,
        user_id = %identity.user_id,
        "Movie updated"
    );
    Ok(Json(movie))
}

async fn remove(
    AdminUser(identity): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    let id = parse_id("movie", &id)?;
    let movie = state.db.movies().delete(id).await?;

    info!(movie_id = %movie.id, user_id = %identity.user_id, "Movie deleted");
    Ok(Json(movie))
}
