use anyhow::Result;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{migrate::MigrateDatabase, Row, Sqlite, SqlitePool};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use super::repositories::{DenominationRepository, StatementRepository, UserRepository};
use super::traits::Connection;

/// Standard yen catalog used to populate an empty `denomination_master`.
const DEFAULT_DENOMINATIONS: [(i64, f64); 10] = [
    (1, 10000.0),
    (2, 5000.0),
    (3, 2000.0),
    (4, 1000.0),
    (5, 500.0),
    (6, 100.0),
    (7, 50.0),
    (8, 10.0),
    (9, 5.0),
    (10, 1.0),
];

/// DbConnection manages the SQLite pool and schema
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (creating if needed) the database at `url` and make sure the schema exists.
    pub async fn new(url: &str, seed_denominations: bool) -> Result<Self> {
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        // Cascading deletes of breakdown lines rely on this pragma.
        let options = SqliteConnectOptions::from_str(url)?.foreign_keys(true);
        let pool = SqlitePool::connect_with(options).await?;

        Self::setup_schema(&pool).await?;
        if seed_denominations {
            Self::seed_denominations(&pool).await?;
        }

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize a test database with a unique name and an empty catalog
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url, false).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                salt TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                token_hash TEXT PRIMARY KEY,
                user_id INTEGER NOT NULL,
                expires_at INTEGER NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Read-only reference catalog
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS denomination_master (
                id INTEGER PRIMARY KEY,
                value REAL NOT NULL CHECK (value > 0)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS statements (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                owner_id INTEGER NOT NULL,
                store_name TEXT NOT NULL,
                date TEXT NOT NULL,
                total_amount REAL NOT NULL,
                notes TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                updated_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY (owner_id) REFERENCES users (id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_statements_owner_date
            ON statements(owner_id, date DESC);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS statement_denominations (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                statement_id INTEGER NOT NULL,
                denomination_id INTEGER NOT NULL,
                quantity INTEGER NOT NULL CHECK (quantity >= 0),
                line_total REAL NOT NULL,
                FOREIGN KEY (statement_id) REFERENCES statements (id) ON DELETE CASCADE,
                FOREIGN KEY (denomination_id) REFERENCES denomination_master (id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_statement_denominations_statement_id
            ON statement_denominations(statement_id);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Populate the catalog with the default yen set if it is empty
    async fn seed_denominations(pool: &SqlitePool) -> Result<()> {
        let count: i64 = sqlx::query("SELECT COUNT(*) AS count FROM denomination_master")
            .fetch_one(pool)
            .await?
            .get("count");
        if count > 0 {
            return Ok(());
        }

        info!("Seeding denomination catalog with {} entries", DEFAULT_DENOMINATIONS.len());
        let mut tx = pool.begin().await?;
        for (id, value) in DEFAULT_DENOMINATIONS {
            sqlx::query("INSERT INTO denomination_master (id, value) VALUES (?, ?)")
                .bind(id)
                .bind(value)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    /// Insert reference rows directly; the catalog has no write path outside tests
    #[cfg(test)]
    pub async fn insert_test_denominations(&self, denominations: &[(i64, f64)]) -> Result<()> {
        for (id, value) in denominations {
            sqlx::query("INSERT INTO denomination_master (id, value) VALUES (?, ?)")
                .bind(id)
                .bind(value)
                .execute(self.pool())
                .await?;
        }
        Ok(())
    }

    /// Insert a bare user row and return its id
    #[cfg(test)]
    pub async fn insert_test_user(&self, email: &str) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO users (email, name, password_hash, salt) VALUES (?, ?, 'x', 'x')",
        )
        .bind(email)
        .bind(email)
        .execute(self.pool())
        .await?;
        Ok(result.last_insert_rowid())
    }
}

impl Connection for DbConnection {
    type StatementRepository = StatementRepository;
    type DenominationRepository = DenominationRepository;
    type UserRepository = UserRepository;

    fn create_statement_repository(&self) -> Self::StatementRepository {
        StatementRepository::new(self.clone())
    }

    fn create_denomination_repository(&self) -> Self::DenominationRepository {
        DenominationRepository::new(self.clone())
    }

    fn create_user_repository(&self) -> Self::UserRepository {
        UserRepository::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seed_populates_empty_catalog_once() {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        let db = DbConnection::new(&db_url, true).await.expect("Failed to open database");
        // Re-opening while the first pool is alive must not duplicate rows.
        let _again = DbConnection::new(&db_url, true).await.expect("Failed to reopen database");

        let count: i64 = sqlx::query("SELECT COUNT(*) AS count FROM denomination_master")
            .fetch_one(db.pool())
            .await
            .unwrap()
            .get("count");
        assert_eq!(count, DEFAULT_DENOMINATIONS.len() as i64);
    }

    #[tokio::test]
    async fn test_init_test_starts_with_empty_catalog() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        let count: i64 = sqlx::query("SELECT COUNT(*) AS count FROM denomination_master")
            .fetch_one(db.pool())
            .await
            .unwrap()
            .get("count");
        assert_eq!(count, 0);
    }
}
