//! Persistence seam for translation rows.
//!
//! Records reach their rows only through [`TranslationStore`]. Two SQL
//! backends are provided: [`PgTranslationStore`] and [`SqliteTranslationStore`].

mod postgres;
mod sqlite;

pub use postgres::PgTranslationStore;
pub use sqlite::SqliteTranslationStore;

use crate::error::Result;
use crate::translation::{OwnerRef, TranslationRow};
use async_trait::async_trait;
use std::sync::Arc;

/// Columns selected for every row, in [`TranslationRow`] field order.
pub(crate) const ROW_COLUMNS: &str = r#"id, translatable_type, translatable_id, "key", locale, value"#;

#[async_trait]
pub trait TranslationStore: Send + Sync {
    /// All rows owned by `owner`, oldest first.
    async fn rows_for_owner(&self, owner: &OwnerRef) -> Result<Vec<TranslationRow>>;

    /// Update the row for `(owner, key, locale)` in place, or create it.
    async fn upsert(
        &self,
        owner: &OwnerRef,
        key: &str,
        locale: &str,
        value: Option<&str>,
    ) -> Result<TranslationRow>;

    async fn delete(&self, row: &TranslationRow) -> Result<()>;
}

#[async_trait]
impl<S> TranslationStore for Arc<S>
where
    S: TranslationStore + ?Sized,
{
    async fn rows_for_owner(&self, owner: &OwnerRef) -> Result<Vec<TranslationRow>> {
        (**self).rows_for_owner(owner).await
    }

    async fn upsert(
        &self,
        owner: &OwnerRef,
        key: &str,
        locale: &str,
        value: Option<&str>,
    ) -> Result<TranslationRow> {
        (**self).upsert(owner, key, locale, value).await
    }

    async fn delete(&self, row: &TranslationRow) -> Result<()> {
        (**self).delete(row).await
    }
}
