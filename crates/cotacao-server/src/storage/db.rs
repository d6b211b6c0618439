//! SQLite database layer (embedded, no external dependencies)

use anyhow::{Context, Result};
use async_trait::async_trait;
use cotacao_core::{Quote, QuoteError, QuoteSink, StoredQuote};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

pub struct Database {
    pool: SqlitePool,
}

fn db_error(e: sqlx::Error) -> QuoteError {
    QuoteError::Database(e.to_string())
}

impl Database {
    /// Open (creating if missing) the database file and make sure the schema exists.
    pub async fn new(database_path: &str, max_connections: u32) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path);

        if let Some(parent) = std::path::Path::new(database_path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.with_context(|| {
                    format!("Failed to create database directory: {}", parent.display())
                })?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .with_context(|| {
                format!("Failed to connect to SQLite database at: {}", database_path)
            })?;

        let db = Self::from_pool(pool);
        db.ensure_schema()
            .await
            .context("Failed to create the cotacao table")?;

        tracing::info!("Database initialization complete");
        Ok(db)
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the `cotacao` table. Safe to call any number of times.
    pub async fn ensure_schema(&self) -> cotacao_core::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cotacao (
                id TEXT PRIMARY KEY,
                bid REAL,
                create_date TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    pub async fn insert(&self, stored: &StoredQuote) -> cotacao_core::Result<()> {
        // bid is bound as text; the REAL column affinity converts numeric text
        sqlx::query(
            r#"
            INSERT INTO cotacao (id, bid, create_date)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&stored.id)
        .bind(&stored.bid)
        .bind(&stored.create_date)
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(())
    }

    pub async fn count(&self) -> cotacao_core::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM cotacao")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)
    }

    /// Most recently inserted records first
    pub async fn list_recent(&self, limit: i64) -> cotacao_core::Result<Vec<StoredQuote>> {
        let rows: Vec<(String, String, String)> = sqlx::query_as(
            r#"
            SELECT id, CAST(bid AS TEXT), COALESCE(create_date, '')
            FROM cotacao
            ORDER BY rowid DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|(id, bid, create_date)| StoredQuote {
                id,
                bid,
                create_date,
            })
            .collect())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl QuoteSink for Database {
    async fn record(&self, quote: &Quote) -> cotacao_core::Result<StoredQuote> {
        let stored = StoredQuote::from_quote(quote);
        self.insert(&stored).await?;
        Ok(stored)
    }
}

#[cfg(test)]
pub(crate) async fn in_memory() -> Database {
    // One connection: every sqlite::memory: connection is its own database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let db = Database::from_pool(pool);
    db.ensure_schema().await.unwrap();
    db
}
