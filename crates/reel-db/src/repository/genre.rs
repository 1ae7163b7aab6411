//! # Genre Repository

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use reel_core::Genre;

#[derive(Debug, sqlx::FromRow)]
struct GenreRecord {
    id: String,
    name: String,
}

impl From<GenreRecord> for Genre {
    fn from(record: GenreRecord) -> Self {
        Genre {
            id: record.id,
            name: record.name,
        }
    }
}

/// Repository for genre database operations.
#[derive(Debug, Clone)]
pub struct GenreRepository {
    pool: SqlitePool,
}

impl GenreRepository {
    pub fn new(pool: SqlitePool) -> Self {
        GenreRepository { pool }
    }

    /// Lists all genres sorted by name.
    pub async fn list(&self) -> DbResult<Vec<Genre>> {
        let records = sqlx::query_as::<_, GenreRecord>("SELECT id, name FROM genres ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        Ok(records.into_iter().map(Genre::from).collect())
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Genre>> {
        let record = sqlx::query_as::<_, GenreRecord>("SELECT id, name FROM genres WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record.map(Genre::from))
    }

    pub async fn insert(&self, genre: &Genre) -> DbResult<Genre> {
        debug!(id = %genre.id, "Inserting genre");

        sqlx::query("INSERT INTO genres (id, name) VALUES (?1, ?2)")
            .bind(&genre.id)
            .bind(&genre.name)
            .execute(&self.pool)
            .await?;

        Ok(genre.clone())
    }

    /// Renames a genre. Movies keep the name they were saved with.
    pub async fn update(&self, genre: &Genre) -> DbResult<()> {
        debug!(id = %genre.id, "Updating genre");

        let result = sqlx::query("UPDATE genres SET name = ?2 WHERE id = ?1")
            .bind(&genre.id)
            .bind(&genre.name)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("genre", &genre.id));
        }

        Ok(())
    }

    /// Deletes a genre and returns what was deleted.
    pub async fn delete(&self, id: &str) -> DbResult<Genre> {
        debug!(id = %id, "Deleting genre");

        let record = sqlx::query_as::<_, GenreRecord>(
            "DELETE FROM genres WHERE id = ?1 RETURNING id, name",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        record
            .map(Genre::from)
            .ok_or_else(|| DbError::not_found("genre", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn genre(id: &str, name: &str) -> Genre {
        Genre {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_genre_crud() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.genres();

        repo.insert(&genre("g-2", "Western")).await.unwrap();
        repo.insert(&genre("g-1", "Comedy")).await.unwrap();

        let names: Vec<String> = repo.list().await.unwrap().into_iter().map(|g| g.name).collect();
        assert_eq!(names, vec!["Comedy", "Western"]);

        repo.update(&genre("g-1", "Slapstick")).await.unwrap();
        assert_eq!(repo.get_by_id("g-1").await.unwrap().unwrap().name, "Slapstick");

        let deleted = repo.delete("g-2").await.unwrap();
        assert_eq!(deleted.name, "Western");
        assert!(repo.get_by_id("g-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_genre() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.genres();

        assert!(matches!(
            repo.update(&genre("nope", "Horror")).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(repo.delete("nope").await, Err(DbError::NotFound { .. })));
    }
}
