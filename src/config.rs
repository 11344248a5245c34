use crate::error::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

pub const DEFAULT_TABLE: &str = "translate";
pub const DEFAULT_LOCALE: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Table holding translation rows
    pub table: String,

    /// Ambient locale used when a record has no locale of its own
    pub default_locale: String,

    /// Process-wide fallback locale
    pub fallback_locale: Option<String>,
}

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").expect("identifier pattern is valid")
    })
}

fn column_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)?$")
            .expect("column pattern is valid")
    })
}

/// `column` or `table.column`, safe to splice into SQL text.
pub(crate) fn is_column_reference(value: &str) -> bool {
    column_pattern().is_match(value)
}

impl Config {
    /// Build a config, rejecting table names that are not plain SQL identifiers.
    ///
    /// The table name is spliced into SQL text, so anything beyond
    /// `[A-Za-z0-9_]` is refused here rather than quoted later.
    pub fn new(
        table: impl Into<String>,
        default_locale: impl Into<String>,
        fallback_locale: Option<String>,
    ) -> Result<Self> {
        let table = table.into();
        if !identifier_pattern().is_match(&table) {
            return Err(Error::InvalidTableName(table));
        }

        Ok(Self {
            table,
            default_locale: default_locale.into(),
            fallback_locale: fallback_locale.filter(|locale| !locale.is_empty()),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(
            std::env::var("TRANSLATABLE_TABLE").unwrap_or_else(|_| DEFAULT_TABLE.to_string()),
            std::env::var("APP_LOCALE").unwrap_or_else(|_| DEFAULT_LOCALE.to_string()),
            std::env::var("APP_FALLBACK_LOCALE").ok(),
        )
    }

    pub fn with_fallback_locale(mut self, locale: impl Into<String>) -> Self {
        self.fallback_locale = Some(locale.into());
        self
    }

    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table: DEFAULT_TABLE.to_string(),
            default_locale: DEFAULT_LOCALE.to_string(),
            fallback_locale: None,
        }
    }
}
