//! # User Repository
//!
//! Registered users. Emails are unique, compared case-insensitively.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use reel_core::User;

const COLUMNS: &str = "id, name, email, password_hash, is_admin, created_at";

#[derive(Debug, sqlx::FromRow)]
struct UserRecord {
    id: String,
    name: String,
    email: String,
    password_hash: String,
    is_admin: bool,
    created_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User {
            id: record.id,
            name: record.name,
            email: record.email,
            password_hash: record.password_hash,
            is_admin: record.is_admin,
            created_at: record.created_at,
        }
    }
}

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE id = ?1");
        let record = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record.map(User::from))
    }

    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let sql = format!("SELECT {COLUMNS} FROM users WHERE email = ?1");
        let record = sqlx::query_as::<_, UserRecord>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(record.map(User::from))
    }

    /// Inserts a new user.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - email already registered
    pub async fn insert(&self, user: &User) -> DbResult<User> {
        debug!(id = %user.id, "Inserting user");

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, is_admin, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.is_admin)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { field, .. } => DbError::duplicate(field, &user.email),
            other => other,
        })?;

        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::{hash_password, verify_password};
    use crate::pool::{Database, DbConfig};

    fn user(id: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            name: "Margaret H".to_string(),
            email: email.to_string(),
            password_hash: hash_password("apollo11").unwrap(),
            is_admin: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.users();
        repo.insert(&user("u-1", "mh@nasa.gov")).await.unwrap();

        let by_email = repo.get_by_email("MH@nasa.gov").await.unwrap().unwrap();
        assert_eq!(by_email.id, "u-1");
        assert!(!by_email.is_admin);
        assert!(verify_password("apollo11", &by_email.password_hash));

        assert!(repo.get_by_id("u-1").await.unwrap().is_some());
        assert!(repo.get_by_id("u-2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.users();
        repo.insert(&user("u-1", "mh@nasa.gov")).await.unwrap();

        let err = repo.insert(&user("u-2", "mh@nasa.gov")).await.unwrap_err();
        match err {
            DbError::UniqueViolation { field, value } => {
                assert_eq!(field, "users.email");
                assert_eq!(value, "mh@nasa.gov");
            }
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
    }
}
