//! `/api/rentals`

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use reel_core::Rental;
use serde::Deserialize;

use super::parse_id;
use crate::error::ApiError;
use crate::gate::AuthUser;
use crate::AppState;

/// Body of both checkout and return.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalBody {
    #[serde(default)]
    pub customer_id: String,
    #[serde(default)]
    pub movie_id: String,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(checkout))
        .route("/{id}", get(get_one))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<Rental>>, ApiError> {
    Ok(Json(state.db.rentals().list().await?))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Rental>, ApiError> {
    let id = parse_id("rental", &id)?;
    state
        .db
        .rentals()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("rental"))
}

async fn checkout(
    AuthUser(identity): AuthUser,
    State(state): State<AppState>,
    body: Result<Json<RentalBody>, JsonRejection>,
) -> Result<Json<Rental>, ApiError> {
    let Json(body) = body?;
    let rental = state
        .rentals
        .checkout(&identity, &body.customer_id, &body.movie_id)
        .await?;
    Ok(Json(rental))
}
