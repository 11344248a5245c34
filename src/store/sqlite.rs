use super::{TranslationStore, ROW_COLUMNS};
use crate::config::Config;
use crate::error::Result;
use crate::translation::{OwnerRef, TranslationRow};
use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::debug;

/// Translation rows in a SQLite database, file-backed or in memory.
#[derive(Debug, Clone)]
pub struct SqliteTranslationStore {
    pool: SqlitePool,
    table: String,
}

impl SqliteTranslationStore {
    /// Wrap an existing SQLite pool, writing to the configured table.
    pub fn new(pool: SqlitePool, config: &Config) -> Self {
        Self {
            pool,
            table: config.table.clone(),
        }
    }

    /// Open (creating if needed) a database file.
    pub async fn open(path: impl AsRef<Path>, config: &Config) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        Ok(Self::new(pool, config))
    }

    /// A private in-memory database.
    ///
    /// Every SQLite connection to `:memory:` gets its own database, so the
    /// pool is pinned to a single connection that is never recycled.
    pub async fn in_memory(config: &Config) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Ok(Self::new(pool, config))
    }

    /// Underlying connection pool, for queries outside the translation table.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Name of the translation table.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Create the translation table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<()> {
        let sql = format!(
            r#"CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                translatable_type TEXT NOT NULL,
                translatable_id INTEGER NOT NULL,
                "key" TEXT NOT NULL,
                locale TEXT NOT NULL,
                value TEXT,
                UNIQUE (translatable_type, translatable_id, "key", locale)
            )"#,
            table = self.table
        );
        sqlx::query(&sql).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl TranslationStore for SqliteTranslationStore {
    async fn rows_for_owner(&self, owner: &OwnerRef) -> Result<Vec<TranslationRow>> {
        let sql = format!(
            "SELECT {ROW_COLUMNS} FROM {} WHERE translatable_type = ? AND translatable_id = ? ORDER BY id",
            self.table
        );
        let rows: Vec<TranslationRow> = sqlx::query_as::<_, TranslationRow>(&sql)
            .bind(&owner.owner_type)
            .bind(owner.owner_id)
            .fetch(&self.pool)
            .try_collect()
            .await?;

        debug!(
            "Loaded {} translation rows for {}#{}",
            rows.len(),
            owner.owner_type,
            owner.owner_id
        );
        Ok(rows)
    }

    async fn upsert(
        &self,
        owner: &OwnerRef,
        key: &str,
        locale: &str,
        value: Option<&str>,
    ) -> Result<TranslationRow> {
        let sql = format!(
            r#"INSERT INTO {} (translatable_type, translatable_id, "key", locale, value)
               VALUES (?, ?, ?, ?, ?)
               ON CONFLICT (translatable_type, translatable_id, "key", locale)
               DO UPDATE SET value = excluded.value
               RETURNING {ROW_COLUMNS}"#,
            self.table
        );
        let row: TranslationRow = sqlx::query_as::<_, TranslationRow>(&sql)
            .bind(&owner.owner_type)
            .bind(owner.owner_id)
            .bind(key)
            .bind(locale)
            .bind(value)
            .fetch_one(&self.pool)
            .await?;

        debug!("Upserted translation {} ({}) as row {}", key, locale, row.id);
        Ok(row)
    }

    async fn delete(&self, row: &TranslationRow) -> Result<()> {
        let sql = format!("DELETE FROM {} WHERE id = ?", self.table);
        sqlx::query(&sql).bind(row.id).execute(&self.pool).await?;

        debug!("Deleted translation row {}", row.id);
        Ok(())
    }
}
