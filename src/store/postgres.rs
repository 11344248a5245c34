use super::{TranslationStore, ROW_COLUMNS};
use crate::config::Config;
use crate::error::Result;
use crate::translation::{OwnerRef, TranslationRow};
use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::debug;

/// Translation rows in a PostgreSQL table.
#[derive(Debug, Clone)]
pub struct PgTranslationStore {
    pool: PgPool,
    table: String,
}

impl PgTranslationStore {
    /// Wrap an existing PostgreSQL pool, writing to the configured table.
    pub fn new(pool: PgPool, config: &Config) -> Self {
        Self {
            pool,
            table: config.table.clone(),
        }
    }

    /// Connect a small pool (5 connections) to `database_url`.
    pub async fn connect(database_url: &str, config: &Config) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool, config))
    }

    /// Underlying connection pool, for queries outside the translation table.
    pub fn pool(&self) -> &PgPool {
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
                id BIGSERIAL PRIMARY KEY,
                translatable_type TEXT NOT NULL,
                translatable_id BIGINT NOT NULL,
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
impl TranslationStore for PgTranslationStore {
    async fn rows_for_owner(&self, owner: &OwnerRef) -> Result<Vec<TranslationRow>> {
        let sql = format!(
            "SELECT {ROW_COLUMNS} FROM {} WHERE translatable_type = $1 AND translatable_id = $2 ORDER BY id",
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
               VALUES ($1, $2, $3, $4, $5)
               ON CONFLICT (translatable_type, translatable_id, "key", locale)
               DO UPDATE SET value = EXCLUDED.value
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
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table);
        sqlx::query(&sql).bind(row.id).execute(&self.pool).await?;

        debug!("Deleted translation row {}", row.id);
        Ok(())
    }
}
