//! `/api/returns`

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use reel_core::Rental;

use super::rentals::RentalBody;
use crate::error::ApiError;
use crate::gate::AuthUser;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(return_rental))
}

/// Closes the open rental for `{customerId, movieId}` and reports its fee.
async fn return_rental(
    AuthUser(identity): AuthUser,
    State(state): State<AppState>,
    body: Result<Json<RentalBody>, JsonRejection>,
) -> Result<Json<Rental>, ApiError> {
    let Json(body) = body?;
    let rental = state
        .rentals
        .return_rental(&identity, &body.customer_id, &body.movie_id)
        .await?;
    Ok(Json(rental))
}
