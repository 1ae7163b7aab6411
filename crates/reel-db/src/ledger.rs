//! # Inventory Ledger
//!
//! The authoritative stock count per movie.
//!
//! ## Stock Update Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    Conditional Decrement                            │
//! │                                                                     │
//! │  ❌ WRONG: read, check, write                                      │
//! │     SELECT number_in_stock ...      -- both requests see 1         │
//! │     UPDATE ... SET number_in_stock = 0                              │
//! │                                                                     │
//! │  ✅ CORRECT: one guarded statement                                  │
//! │     UPDATE movies SET number_in_stock = number_in_stock - 1        │
//! │     WHERE id = ? AND number_in_stock > 0                           │
//! │     RETURNING number_in_stock                                      │
//! │                                                                     │
//! │  The second request matches no row and gets OutOfStock.           │
//! │  CHECK (number_in_stock >= 0) backs this up in the schema.         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation runs inside a [`UnitOfWork`]; there is no way to write
//! stock outside a transaction.

use thiserror::Error;
use tracing::debug;

use crate::error::DbError;
use crate::unit_of_work::UnitOfWork;

/// Inventory ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The movie exists but has no copies left.
    #[error("Movie {movie_id} is out of stock")]
    OutOfStock { movie_id: String },

    /// No movie row with this id.
    #[error("Movie not found: {movie_id}")]
    NotFound { movie_id: String },

    /// A restock count below zero.
    #[error("Stock count cannot be negative: {count}")]
    NegativeCount { count: i64 },

    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<sqlx::Error> for LedgerError {
    fn from(err: sqlx::Error) -> Self {
        LedgerError::Db(err.into())
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;

/// Stock operations on `movies.number_in_stock`.
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryLedger;

impl InventoryLedger {
    pub fn new() -> Self {
        InventoryLedger
    }

    /// Takes one copy out of stock. Returns the new count.
    ///
    /// ## Returns
    /// * `Ok(n)` - copy taken, `n` left
    /// * `Err(OutOfStock)` - count was already 0, nothing written
    /// * `Err(NotFound)` - no such movie
    pub async fn decrement(&self, uow: &mut UnitOfWork, movie_id: &str) -> LedgerResult<i64> {
        debug!(movie_id = %movie_id, "Decrementing stock");

        let remaining: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE movies
            SET number_in_stock = number_in_stock - 1
            WHERE id = ?1 AND number_in_stock > 0
            RETURNING number_in_stock
            "#,
        )
        .bind(movie_id)
        .fetch_optional(uow.conn())
        .await?;

        match remaining {
            Some(count) => Ok(count),
            None => {
                // Nothing matched: tell a missing movie from an empty shelf.
                let exists: Option<i64> =
                    sqlx::query_scalar("SELECT number_in_stock FROM movies WHERE id = ?1")
                        .bind(movie_id)
                        .fetch_optional(uow.conn())
                        .await?;
                match exists {
                    Some(_) => Err(LedgerError::OutOfStock {
                        movie_id: movie_id.to_string(),
                    }),
                    None => Err(LedgerError::NotFound {
                        movie_id: movie_id.to_string(),
                    }),
                }
            }
        }
    }

    /// Puts one copy back. Returns the new count.
    pub async fn increment(&self, uow: &mut UnitOfWork, movie_id: &str) -> LedgerResult<i64> {
        debug!(movie_id = %movie_id, "Incrementing stock");

        let count: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE movies
            SET number_in_stock = number_in_stock + 1
            WHERE id = ?1
            RETURNING number_in_stock
            "#,
        )
        .bind(movie_id)
        .fetch_optional(uow.conn())
        .await?;

        count.ok_or_else(|| LedgerError::NotFound {
            movie_id: movie_id.to_string(),
        })
    }

    /// Sets an absolute count after a catalog edit.
    pub async fn restock(&self, uow: &mut UnitOfWork, movie_id: &str, count: i64) -> LedgerResult<()> {
        if count < 0 {
            return Err(LedgerError::NegativeCount { count });
        }

        debug!(movie_id = %movie_id, count = count, "Restocking");

        let result = sqlx::query("UPDATE movies SET number_in_stock = ?2 WHERE id = ?1")
            .bind(movie_id)
            .bind(count)
            .execute(uow.conn())
            .await?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::NotFound {
                movie_id: movie_id.to_string(),
            });
        }

        Ok(())
    }

    /// Current count as seen inside the unit of work.
    pub async fn stock(&self, uow: &mut UnitOfWork, movie_id: &str) -> LedgerResult<i64> {
        let count: Option<i64> =
            sqlx::query_scalar("SELECT number_in_stock FROM movies WHERE id = ?1")
                .bind(movie_id)
                .fetch_optional(uow.conn())
                .await?;

        count.ok_or_else(|| LedgerError::NotFound {
            movie_id: movie_id.to_string(),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
