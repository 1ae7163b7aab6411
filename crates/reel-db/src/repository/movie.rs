//! # Movie Repository
//!
//! Catalog operations for movies.
//!
//! ## Who Writes What
//! ```text
//! ┌───────────────────────────┬─────────────────────────────────────────┐
//! │ Column                    │ Writer                                  │
//! ├───────────────────────────┼─────────────────────────────────────────┤
//! │ title, genre_*, rate      │ MovieRepository::insert / update_details│
//! │ number_in_stock (initial) │ MovieRepository::insert                 │
//! │ number_in_stock (after)   │ InventoryLedger only                    │
//! └───────────────────────────┴─────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::unit_of_work::UnitOfWork;
use reel_core::{GenreSnapshot, Money, Movie};

const COLUMNS: &str = "id, title, genre_id, genre_name, number_in_stock, daily_rental_rate_cents";

#[derive(Debug, sqlx::FromRow)]
struct MovieRecord {
    id: String,
    title: String,
    genre_id: String,
    genre_name: String,
    number_in_stock: i64,
    daily_rental_rate_cents: i64,
}

impl From<MovieRecord> for Movie {
    fn from(record: MovieRecord) -> Self {
        Movie {
            id: record.id,
            title: record.title,
            genre: GenreSnapshot {
                id: record.genre_id,
                name: record.genre_name,
            },
            number_in_stock: record.number_in_stock,
            daily_rental_rate: Money::from_cents(record.daily_rental_rate_cents),
        }
    }
}

/// Repository for movie database operations.
#[derive(Debug, Clone)]
pub struct MovieRepository {
    pool: SqlitePool,
}

impl MovieRepository {
    pub fn new(pool: SqlitePool) -> Self {
        MovieRepository { pool }
    }

    /// Lists movies sorted by title.
    pub async fn list(&self) -> DbResult<Vec<Movie>> {
        let sql = format!("SELECT {COLUMNS} FROM movies ORDER BY title");
        let records = sqlx::query_as::<_, MovieRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = records.len(), "Listed movies");
        Ok(records.into_iter().map(Movie::from).collect())
    }

    /// Gets a movie by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Movie))` - Movie found
    /// * `Ok(None)` - Movie not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Movie>> {
        let sql = format!("SELECT {COLUMNS} FROM movies WHERE id = ?1");
        let record = sqlx::query_as::<_, MovieRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record.map(Movie::from))
    }

    /// Inserts a new movie with its initial stock.
    pub async fn insert(&self, movie: &Movie) -> DbResult<Movie> {
        debug!(id = %movie.id, title = %movie.title, "Inserting movie");

        sqlx::query(
            r#"
            INSERT INTO movies (
                id, title, genre_id, genre_name,
                number_in_stock, daily_rental_rate_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&movie.id)
        .bind(&movie.title)
        .bind(&movie.genre.id)
        .bind(&movie.genre.name)
        .bind(movie.number_in_stock)
        .bind(movie.daily_rental_rate.cents())
        .execute(&self.pool)
        .await?;

        Ok(movie.clone())
    }

    /// Updates catalog fields. Leaves `number_in_stock` alone; pair this
    /// with `InventoryLedger::restock` in the same unit of work.
    pub async fn update_details(&self, uow: &mut UnitOfWork, movie: &Movie) -> DbResult<()> {
        debug!(id = %movie.id, "Updating movie details");

        let result = sqlx::query(
            r#"
            UPDATE movies SET
                title = ?2,
                genre_id = ?3,
                genre_name = ?4,
                daily_rental_rate_cents = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&movie.id)
        .bind(&movie.title)
        .bind(&movie.genre.id)
        .bind(&movie.genre.name)
        .bind(movie.daily_rental_rate.cents())
        .execute(uow.conn())
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("movie", &movie.id));
        }

        Ok(())
    }

    /// Deletes a movie and returns what was deleted.
    ///
    /// Open rentals keep their snapshot; returning them later still works.
    pub async fn delete(&self, id: &str) -> DbResult<Movie> {
        debug!(id = %id, "Deleting movie");

        let sql = format!("DELETE FROM movies WHERE id = ?1 RETURNING {COLUMNS}");
        let record = sqlx::query_as::<_, MovieRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        record
            .map(Movie::from)
            .ok_or_else(|| DbError::not_found("movie", id))
    }

    /// Counts movies (for the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM movies")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
