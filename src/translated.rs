//! Locale-aware attribute access for a translatable host record.
//!
//! [`HasTranslations`] wraps a host record together with a store and keeps
//! the record's [`TranslationIndex`]. Reads build the index once; writes go
//! straight to the store and are merged into the index when it is loaded.

use crate::config::Config;
use crate::error::Result;
use crate::index::TranslationIndex;
use crate::locale::resolve_locale;
use crate::metrics::TranslationMetrics;
use crate::model::{Attributes, Translatable};
use crate::store::TranslationStore;
use crate::translation::{OwnerRef, TranslationRow};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// `locale -> value` for one attribute.
pub type LocaleValues = BTreeMap<String, Option<String>>;

#[derive(Debug)]
pub struct HasTranslations<M, S> {
    model: M,
    store: S,
    config: Arc<Config>,
    locale: Option<String>,
    index: TranslationIndex,
}

impl<M, S> HasTranslations<M, S>
where
    M: Translatable,
    S: TranslationStore,
{
    /// Wrap `model`, reading and writing its translations through `store`.
    ///
    /// The index stays empty until the first read needs it.
    pub fn new(model: M, store: S, config: Arc<Config>) -> Self {
        Self {
            model,
            store,
            config,
            locale: None,
            index: TranslationIndex::new(),
        }
    }

    /// Wrap `model` with an instance locale already set.
    pub fn using_locale(model: M, store: S, config: Arc<Config>, locale: &str) -> Self {
        let mut translated = Self::new(model, store, config);
        translated.set_locale(locale);
        translated
    }

    /// The wrapped host record.
    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Unwrap the host record, dropping the cached index.
    pub fn into_model(self) -> M {
        self.model
    }

    /// Store backing this record's translation rows.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Owner reference written on every translation row of this record.
    pub fn owner(&self) -> OwnerRef {
        self.model.owner_ref()
    }

    // ==================== Locale ====================

    /// Instance locale, or the configured default locale.
    pub fn locale(&self) -> &str {
        self.locale
            .as_deref()
            .unwrap_or(self.config.default_locale.as_str())
    }

    /// Set the locale used by [`get`](Self::get), [`set`](Self::set) and
    /// [`fill`](Self::fill) on this instance.
    pub fn set_locale(&mut self, locale: &str) -> &mut Self {
        self.locale = Some(locale.to_string());
        self
    }

    /// Whether attribute reads may fall back, as declared by the host type.
    pub fn use_fallback_locale(&self) -> bool {
        M::USE_FALLBACK_LOCALE
    }

    /// Model-level fallback locale, else the configured one.
    pub fn fallback_locale(&self) -> Option<&str> {
        self.model
            .fallback_locale()
            .or(self.config.fallback_locale.as_deref())
    }

    pub fn is_translatable_attribute(&self, key: &str) -> bool {
        M::is_translatable_attribute(key)
    }

    pub fn translatable_attributes(&self) -> &'static [&'static str] {
        M::translatable_attributes()
    }

    // ==================== Index ====================

    async fn load_index(&mut self) -> Result<&TranslationIndex> {
        if !self.index.is_loaded() {
            let owner = self.model.owner_ref();
            let rows = self.store.rows_for_owner(&owner).await?;
            debug!(
                "Indexed {} translations for {}#{}",
                rows.len(),
                owner.owner_type,
                owner.owner_id
            );
            self.index.load(rows);
            TranslationMetrics::global().record_index_build();
        }
        Ok(&self.index)
    }

    /// Drop the cached rows; the next access reloads them from the store.
    ///
    /// Call this after changing this record's rows through any other path.
    pub fn invalidate(&mut self) {
        self.index.invalidate();
    }

    pub fn is_index_loaded(&self) -> bool {
        self.index.is_loaded()
    }

    // ==================== Reads ====================

    /// Value of `key` in `locale`, resolving a fallback locale when allowed.
    pub async fn get_translation(
        &mut self,
        key: &str,
        locale: &str,
        use_fallback_locale: bool,
    ) -> Result<Option<String>> {
        M::guard_translatable(key)?;
        let fallback = self.fallback_locale().map(str::to_string);
        let index = self.load_index().await?;

        let translated = index.locales_for_key(key);
        let resolved = resolve_locale(&translated, locale, use_fallback_locale, fallback.as_deref());
        let metrics = TranslationMetrics::global();
        if resolved != locale {
            debug!("No {} translation for {}, using {}", locale, key, resolved);
            metrics.record_fallback();
        }

        match index.get(key, resolved) {
            Some(row) => {
                metrics.record_hit();
                Ok(row.value.clone())
            }
            None => {
                metrics.record_miss();
                Ok(None)
            }
        }
    }

    /// Every stored `locale -> value` pair of `key`.
    pub async fn get_translations(&mut self, key: &str) -> Result<LocaleValues> {
        M::guard_translatable(key)?;
        let index = self.load_index().await?;
        Ok(index
            .rows_for_key(key)
            .map(|row| (row.locale.clone(), row.value.clone()))
            .collect())
    }

    /// `key -> (locale -> value)` for every declared attribute.
    pub async fn all_translations(&mut self) -> Result<BTreeMap<String, LocaleValues>> {
        let mut all = BTreeMap::new();
        for key in M::translatable_attributes() {
            all.insert(key.to_string(), self.get_translations(key).await?);
        }
        Ok(all)
    }

    /// Locales that have a row for `key`, in store order.
    pub async fn translated_locales(&mut self, key: &str) -> Result<Vec<String>> {
        M::guard_translatable(key)?;
        Ok(self.load_index().await?.locales_for_key(key))
    }

    /// Cached row for `(key, locale)`, without locale resolution.
    pub async fn translation_row(
        &mut self,
        key: &str,
        locale: &str,
    ) -> Result<Option<&TranslationRow>> {
        M::guard_translatable(key)?;
        Ok(self.load_index().await?.get(key, locale))
    }

    /// Whether a row exists for exactly `(key, locale)`.
    pub async fn has_translation(&mut self, key: &str, locale: &str) -> Result<bool> {
        M::guard_translatable(key)?;
        Ok(self.load_index().await?.contains(key, locale))
    }

    // ==================== Writes ====================

    /// Create or update the row for `(key, locale)` immediately.
    pub async fn set_translation(
        &mut self,
        key: &str,
        locale: &str,
        value: Option<&str>,
    ) -> Result<&mut Self> {
        M::guard_translatable(key)?;
        let owner = self.model.owner_ref();
        let row = self.store.upsert(&owner, key, locale, value).await?;
        self.index.upsert(row);
        TranslationMetrics::global().record_write();
        Ok(self)
    }

    /// Apply [`set_translation`](Self::set_translation) once per entry, in
    /// iteration order. Earlier writes stay committed if a later one fails.
    pub async fn set_translations<I, L, V>(&mut self, key: &str, translations: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (L, Option<V>)>,
        L: AsRef<str>,
        V: AsRef<str>,
    {
        M::guard_translatable(key)?;
        for (locale, value) in translations {
            let value: Option<&str> = value.as_ref().map(|v| v.as_ref());
            self.set_translation(key, locale.as_ref(), value).await?;
        }
        Ok(self)
    }

    /// Delete the row for `(key, locale)` if there is one.
    pub async fn forget_translation(&mut self, key: &str, locale: &str) -> Result<&mut Self> {
        M::guard_translatable(key)?;
        let existing = self.load_index().await?.get(key, locale).cloned();
        if let Some(row) = existing {
            self.store.delete(&row).await?;
            self.index.remove(key, locale);
            TranslationMetrics::global().record_delete();
        }
        Ok(self)
    }

    // ==================== Attribute access ====================

    /// Read an attribute: translations for declared keys, plain storage
    /// otherwise.
    pub async fn get(&mut self, key: &str) -> Result<Option<Value>> {
        if !M::is_translatable_attribute(key) {
            return Ok(self.model.attributes().get(key).cloned());
        }

        let locale = self.locale().to_string();
        let use_fallback = self.use_fallback_locale();
        Ok(self
            .get_translation(key, &locale, use_fallback)
            .await?
            .map(Value::String))
    }

    /// Write an attribute at the current locale or into plain storage.
    pub async fn set(&mut self, key: &str, value: Value) -> Result<&mut Self> {
        if !M::is_translatable_attribute(key) {
            self.model.attributes_mut().insert(key.to_string(), value);
            return Ok(self);
        }

        let locale = self.locale().to_string();
        let text = value_to_text(value);
        self.set_translation(key, &locale, text.as_deref()).await
    }

    /// Mass-assign `attributes`: declared keys become translations at the
    /// current locale, the rest are handed to plain storage.
    pub async fn fill(&mut self, attributes: Attributes) -> Result<&mut Self> {
        let locale = self.locale().to_string();
        let mut plain = Attributes::new();

        for (key, value) in attributes {
            if M::is_translatable_attribute(&key) {
                let text = value_to_text(value);
                self.set_translation(&key, &locale, text.as_deref()).await?;
            } else {
                plain.insert(key, value);
            }
        }

        self.model.attributes_mut().extend(plain);
        Ok(self)
    }
}

/// Text stored for a JSON value: strings as-is, `null` as no value,
/// anything else as its JSON text.
fn value_to_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}
