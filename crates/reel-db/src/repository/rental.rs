//! # Rental Repository
//!
//! Rental records: opened by checkout, closed once by a return.
//!
//! ## Close Guard
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Two returns race for the same rental                               │
//! │                                                                     │
//! │  A: UPDATE rentals SET date_returned = .., rental_fee_cents = ..   │
//! │     WHERE id = ? AND date_returned IS NULL      → 1 row  ✅        │
//! │  B: same statement                              → 0 rows ❌        │
//! │                                                                     │
//! │  B learns it lost and reports "already returned"; the fee is       │
//! │  computed and stored exactly once.                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use crate::unit_of_work::UnitOfWork;
use reel_core::{CustomerSnapshot, Money, MovieSnapshot, Rental};

const COLUMNS: &str = r#"
    id,
    customer_id, customer_name, customer_phone,
    movie_id, movie_title, daily_rental_rate_cents,
    date_out, date_returned, rental_fee_cents
"#;

#[derive(Debug, sqlx::FromRow)]
struct RentalRecord {
    id: String,
    customer_id: String,
    customer_name: String,
    customer_phone: String,
    movie_id: String,
    movie_title: String,
    daily_rental_rate_cents: i64,
    date_out: DateTime<Utc>,
    date_returned: Option<DateTime<Utc>>,
    rental_fee_cents: Option<i64>,
}

impl From<RentalRecord> for Rental {
    fn from(record: RentalRecord) -> Self {
        Rental {
            id: record.id,
            customer: CustomerSnapshot {
                id: record.customer_id,
                name: record.customer_name,
                phone: record.customer_phone,
            },
            movie: MovieSnapshot {
                id: record.movie_id,
                title: record.movie_title,
                daily_rental_rate: Money::from_cents(record.daily_rental_rate_cents),
            },
            date_out: record.date_out,
            date_returned: record.date_returned,
            rental_fee: record.rental_fee_cents.map(Money::from_cents),
        }
    }
}

/// Repository for rental database operations.
#[derive(Debug, Clone)]
pub struct RentalRepository {
    pool: SqlitePool,
}

impl RentalRepository {
    pub fn new(pool: SqlitePool) -> Self {
        RentalRepository { pool }
    }

    /// Lists rentals, most recent checkout first.
    pub async fn list(&self) -> DbResult<Vec<Rental>> {
        let sql = format!("SELECT {COLUMNS} FROM rentals ORDER BY date_out DESC, rowid DESC");
        let records = sqlx::query_as::<_, RentalRecord>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(records.into_iter().map(Rental::from).collect())
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Rental>> {
        let sql = format!("SELECT {COLUMNS} FROM rentals WHERE id = ?1");
        let record = sqlx::query_as::<_, RentalRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record.map(Rental::from))
    }

    /// Finds the rental a return for this pair refers to.
    ///
    /// The most recent open rental wins; with none open, the most recent
    /// closed one is returned so the caller can report "already returned".
    pub async fn find_for_pair(&self, customer_id: &str, movie_id: &str) -> DbResult<Option<Rental>> {
        debug!(customer_id = %customer_id, movie_id = %movie_id, "Looking up rental");

        let sql = format!(
            r#"
            SELECT {COLUMNS} FROM rentals
            WHERE customer_id = ?1 AND movie_id = ?2
            ORDER BY (date_returned IS NULL) DESC, date_out DESC, rowid DESC
            LIMIT 1
            "#
        );
        let record = sqlx::query_as::<_, RentalRecord>(&sql)
            .bind(customer_id)
            .bind(movie_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record.map(Rental::from))
    }

    /// Whether the pair already has an open rental, as seen inside the unit.
    pub async fn has_open(
        &self,
        uow: &mut UnitOfWork,
        customer_id: &str,
        movie_id: &str,
    ) -> DbResult<bool> {
        let open: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM rentals
                WHERE customer_id = ?1 AND movie_id = ?2 AND date_returned IS NULL
            )
            "#,
        )
        .bind(customer_id)
        .bind(movie_id)
        .fetch_one(uow.conn())
        .await?;

        Ok(open)
    }

    /// Inserts a freshly opened rental.
    pub async fn insert(&self, uow: &mut UnitOfWork, rental: &Rental) -> DbResult<()> {
        debug!(id = %rental.id, movie_id = %rental.movie.id, "Inserting rental");

        sqlx::query(
            r#"
            INSERT INTO rentals (
                id,
                customer_id, customer_name, customer_phone,
                movie_id, movie_title, daily_rental_rate_cents,
                date_out, date_returned, rental_fee_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&rental.id)
        .bind(&rental.customer.id)
        .bind(&rental.customer.name)
        .bind(&rental.customer.phone)
        .bind(&rental.movie.id)
        .bind(&rental.movie.title)
        .bind(rental.movie.daily_rental_rate.cents())
        .bind(rental.date_out)
        .bind(rental.date_returned)
        .bind(rental.rental_fee.map(|fee| fee.cents()))
        .execute(uow.conn())
        .await?;

        Ok(())
    }

    /// Closes an open rental.
    ///
    /// ## Returns
    /// * `Ok(true)` - this call closed it
    /// * `Ok(false)` - it was already closed (or does not exist)
    pub async fn close(
        &self,
        uow: &mut UnitOfWork,
        rental_id: &str,
        date_returned: DateTime<Utc>,
        fee: Money,
    ) -> DbResult<bool> {
        debug!(id = %rental_id, fee = %fee, "Closing rental");

        let result = sqlx::query(
            r#"
            UPDATE rentals
            SET date_returned = ?2, rental_fee_cents = ?3
            WHERE id = ?1 AND date_returned IS NULL
            "#,
        )
        .bind(rental_id)
        .bind(date_returned)
        .bind(fee.cents())
        .execute(uow.conn())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    /// Counts rentals (for tests and diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rentals")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::{Duration, TimeZone};

    fn rental(id: &str, date_out: DateTime<Utc>) -> Rental {
        Rental {
            id: id.to_string(),
            customer: CustomerSnapshot {
                id: "c-1".into(),
                name: "Alan Turing".into(),
                phone: "555-0112".into(),
            },
            movie: MovieSnapshot {
                id: "m-1".into(),
                title: "Metropolis".into(),
                daily_rental_rate: Money::from_cents(200),
            },
            date_out,
            date_returned: None,
            rental_fee: None,
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 9, 0, 0).unwrap()
    }

    async fn insert(db: &Database, rental: &Rental) {
        let mut uow = db.begin().await.unwrap();
        db.rentals().insert(&mut uow, rental).await.unwrap();
        uow.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trips_snapshots() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let original = rental("r-1", start());
        insert(&db, &original).await;

        let stored = db.rentals().get_by_id("r-1").await.unwrap().unwrap();
        assert_eq!(stored, original);
        assert!(stored.is_open());
    }

    #[tokio::test]
    async fn test_has_open_tracks_return_state() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.rentals();

        let mut uow = db.begin().await.unwrap();
        assert!(!repo.has_open(&mut uow, "c-1", "m-1").await.unwrap());
        repo.insert(&mut uow, &rental("r-1", start())).await.unwrap();
        assert!(repo.has_open(&mut uow, "c-1", "m-1").await.unwrap());
        assert!(!repo.has_open(&mut uow, "c-1", "m-2").await.unwrap());

        repo.close(&mut uow, "r-1", start() + Duration::days(1), Money::from_cents(200))
            .await
            .unwrap();
        assert!(!repo.has_open(&mut uow, "c-1", "m-1").await.unwrap());
        uow.commit().await.unwrap();
    }

    #[tokio::test]
    async fn test_close_only_once() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        insert(&db, &rental("r-1", start())).await;
        let repo = db.rentals();
        let returned_at = start() + Duration::days(7);

        let mut uow = db.begin().await.unwrap();
        assert!(repo
            .close(&mut uow, "r-1", returned_at, Money::from_cents(1400))
            .await
            .unwrap());
        assert!(!repo
            .close(&mut uow, "r-1", returned_at, Money::from_cents(9999))
            .await
            .unwrap());
        uow.commit().await.unwrap();

        let stored = repo.get_by_id("r-1").await.unwrap().unwrap();
        assert_eq!(stored.date_returned, Some(returned_at));
        assert_eq!(stored.rental_fee, Some(Money::from_cents(1400)));
    }

    #[tokio::test]
    async fn test_find_for_pair_prefers_open_rental() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.rentals();

        // older rental still open, newer one closed
        insert(&db, &rental("r-open", start())).await;
        insert(&db, &rental("r-closed", start() + Duration::days(2))).await;
        let mut uow = db.begin().await.unwrap();
        repo.close(&mut uow, "r-closed", start() + Duration::days(3), Money::from_cents(200))
            .await
            .unwrap();
        uow.commit().await.unwrap();

        let found = repo.find_for_pair("c-1", "m-1").await.unwrap().unwrap();
        assert_eq!(found.id, "r-open");

        assert!(repo.find_for_pair("c-1", "m-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        insert(&db, &rental("r-old", start())).await;
        insert(&db, &rental("r-new", start() + Duration::hours(1))).await;

        let ids: Vec<String> = db.rentals().list().await.unwrap().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["r-new", "r-old"]);
        assert_eq!(db.rentals().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_schema_rejects_half_closed_rental() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        insert(&db, &rental("r-1", start())).await;

        let result = sqlx::query("UPDATE rentals SET rental_fee_cents = 100 WHERE id = 'r-1'")
            .execute(db.pool())
            .await;
        assert!(result.is_err());
    }
}
