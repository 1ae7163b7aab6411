//! # Unit of Work
//!
//! A transactional boundary shared by the inventory ledger and the
//! rental store.
//!
//! ```text
//!   db.begin() ──► UnitOfWork ──► ledger.decrement(&mut uow)
//!                      │      ──► rentals.insert(&mut uow)
//!                      │
//!          ┌───────────┼───────────────┐
//!          ▼           ▼               ▼
//!      commit()    rollback()     dropped (rollback)
//! ```
//!
//! SQLite opens the transaction lazily. Callers issue their first write
//! before any read inside the unit, so a writer queued behind another one
//! waits on the busy timeout and then sees fresh data.

use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use tracing::debug;

use crate::error::{DbError, DbResult};

/// An open database transaction. Dropping it without [`commit`] rolls
/// every write back.
///
/// [`commit`]: UnitOfWork::commit
#[derive(Debug)]
pub struct UnitOfWork {
    tx: Transaction<'static, Sqlite>,
}

impl UnitOfWork {
    /// Begins a transaction on a pooled connection.
    pub async fn begin(pool: &SqlitePool) -> DbResult<Self> {
        let tx = pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
        debug!("Unit of work started");
        Ok(UnitOfWork { tx })
    }

    /// The connection every statement in this unit runs on.
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut *self.tx
    }

    /// Applies every write made in this unit.
    pub async fn commit(self) -> DbResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
        debug!("Unit of work committed");
        Ok(())
    }

    /// Discards every write made in this unit.
    pub async fn rollback(self) -> DbResult<()> {
        self.tx
            .rollback()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
        debug!("Unit of work rolled back");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};

    async fn genre_count(db: &Database) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM genres")
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    async fn insert_genre(uow: &mut super::UnitOfWork) {
        sqlx::query("INSERT INTO genres (id, name) VALUES ('g-1', 'Drama')")
            .execute(uow.conn())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_commit_applies_writes() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut uow = db.begin().await.unwrap();
        insert_genre(&mut uow).await;
        uow.commit().await.unwrap();

        assert_eq!(genre_count(&db).await, 1);
    }

    #[tokio::test]
    async fn test_rollback_discards_writes() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut uow = db.begin().await.unwrap();
        insert_genre(&mut uow).await;
        uow.rollback().await.unwrap();

        assert_eq!(genre_count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_drop_rolls_back() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        {
            let mut uow = db.begin().await.unwrap();
            insert_genre(&mut uow).await;
        }

        assert_eq!(genre_count(&db).await, 0);
    }
}
