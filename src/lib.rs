//! Per-locale translatable attributes for database-backed records.
//!
//! A host record implements [`Translatable`] to declare which of its keys
//! vary by locale, then is wrapped in [`HasTranslations`] together with a
//! [`TranslationStore`]. Declared keys are read and written as translation
//! rows keyed by `(owner, key, locale)`; all other keys stay in the record's
//! plain attribute map.
//!
//! ```rust,ignore
//! let config = Arc::new(Config::from_env()?);
//! let store = PgTranslationStore::connect(&database_url, &config).await?;
//! let mut post = HasTranslations::new(post, store, config);
//!
//! post.set_translation("title", "en", Some("Hello")).await?;
//! post.set_translation("title", "id", Some("Halo")).await?;
//! assert_eq!(post.get_translation("title", "id", true).await?.as_deref(), Some("Halo"));
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod locale;
pub mod metrics;
pub mod model;
pub mod scope;
pub mod store;
pub mod translated;
pub mod translation;

pub use config::Config;
pub use error::{Error, Result};
pub use index::TranslationIndex;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use model::{Attributes, Translatable};
pub use scope::{Operator, WhereLocale};
pub use store::{PgTranslationStore, SqliteTranslationStore, TranslationStore};
pub use translated::{HasTranslations, LocaleValues};
pub use translation::{OwnerRef, TranslationRow};
