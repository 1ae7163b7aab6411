//! # Customer Repository
//!
//! Customers are referenced by rentals through snapshots only; editing or
//! deleting one here never touches rental history.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use reel_core::Customer;

const COLUMNS: &str = "id, name, phone, is_gold";

#[derive(Debug, sqlx::FromRow)]
struct CustomerRecord {
    id: String,
    name: String,
    phone: String,
    is_gold: bool,
}

impl From<CustomerRecord> for Customer {
    fn from(record: CustomerRecord) -> Self {
        Customer {
            id: record.id,
            name: record.name,
            phone: record.phone,
            is_gold: record.is_gold,
        }
    }
}

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Lists customers sorted by name.
    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let sql = format!("SELECT {COLUMNS} FROM customers ORDER BY name");
        let records = sqlx::query_as::<_, CustomerRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(records.into_iter().map(Customer::from).collect())
    }

    /// Gets a customer by ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Customer))` - Customer found
    /// * `Ok(None)` - Customer not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Customer>> {
        let sql = format!("SELECT {COLUMNS} FROM customers WHERE id = ?1");
        let record = sqlx::query_as::<_, CustomerRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record.map(Customer::from))
    }

    pub async fn insert(&self, customer: &Customer) -> DbResult<Customer> {
        debug!(id = %customer.id, "Inserting customer");

        sqlx::query("INSERT INTO customers (id, name, phone, is_gold) VALUES (?1, ?2, ?3, ?4)")
            .bind(&customer.id)
            .bind(&customer.name)
            .bind(&customer.phone)
            .bind(customer.is_gold)
            .execute(&self.pool)
            .await?;

        Ok(customer.clone())
    }

    pub async fn update(&self, customer: &Customer) -> DbResult<()> {
        debug!(id = %customer.id, "Updating customer");

        let result =
            sqlx::query("UPDATE customers SET name = ?2, phone = ?3, is_gold = ?4 WHERE id = ?1")
                .bind(&customer.id)
                .bind(&customer.name)
                .bind(&customer.phone)
                .bind(customer.is_gold)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("customer", &customer.id));
        }

        Ok(())
    }

    /// Deletes a customer and returns what was deleted.
    pub async fn delete(&self, id: &str) -> DbResult<Customer> {
        debug!(id = %id, "Deleting customer");

        let sql = format!("DELETE FROM customers WHERE id = ?1 RETURNING {COLUMNS}");
        let record = sqlx::query_as::<_, CustomerRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        record
            .map(Customer::from)
            .ok_or_else(|| DbError::not_found("customer", id))
    }
}
