//! `/api/customers`

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use reel_core::validation::validate_customer;
use reel_core::Customer;
use reel_db::repository::generate_id;
use serde::Deserialize;
use tracing::info;

use super::parse_id;
use crate::error::ApiError;
use crate::gate::{AdminUser, AuthUser};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerBody {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub is_gold: bool,
}

impl CustomerBody {
    fn into_customer(self, id: String) -> Result<Customer, ApiError> {
        validate_customer(&self.name, &self.phone)?;
        Ok(Customer {
            id,
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            is_gold: self.is_gold,
        })
    }
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_one).put(update).delete(remove))
}

async fn list(State(state): State<AppState>) -> Result<Json<Vec<Customer>>, ApiError> {
    Ok(Json(state.db.customers().list().await?))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Customer>, ApiError> {
    let id = parse_id("customer", &id)?;
    state
        .db
        .customers()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("customer"))
}

async fn create(
    AuthUser(identity): AuthUser,
    State(state): State<AppState>,
    body: Result<Json<CustomerBody>, JsonRejection>,
) -> Result<Json<Customer>, ApiError> {
    let Json(body) = body?;
    let customer = body.into_customer(generate_id())?;
    let customer = state.db.customers().insert(&customer).await?;

    info!(customer_id = %customer.id, user_id = %identity.user_id, "Customer created");
    Ok(Json(customer))
}

async fn update(
    AuthUser(_): AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<CustomerBody>, JsonRejection>,
) -> Result<Json<Customer>, ApiError> {
    let id = parse_id("customer", &id)?;
    let Json(body) = body?;
    let customer = body.into_customer(id.to_string())?;

    state.db.customers().update(&customer).await?;
    Ok(Json(customer))
}

async fn remove(
    AdminUser(identity): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Customer>, ApiError> {
    let id = parse_id("customer", &id)?;
    let customer = state.db.customers().delete(id).await?;

    info!(customer_id = %customer.id, user_id = %identity.user_id, "Customer deleted");
    Ok(Json(customer))
}
