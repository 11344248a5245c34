//! The capability a host record implements to gain translatable attributes.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::scope::{Operator, WhereLocale};
use crate::translation::OwnerRef;
use serde_json::{Map, Value};

/// Plain (untranslated) attribute storage of a host record.
pub type Attributes = Map<String, Value>;

/// A record whose declared keys are stored per locale in translation rows.
///
/// Keys outside [`Translatable::TRANSLATABLE`] stay in the record's own
/// [`Attributes`].
///
/// # Example
/// ```ignore
/// struct Post {
///     id: i64,
///     attributes: Attributes,
/// }
///
/// impl Translatable for Post {
///     const MODEL_TYPE: &'static str = "post";
///     const TABLE: &'static str = "posts";
///     const TRANSLATABLE: &'static [&'static str] = &["title", "body"];
///
///     fn id(&self) -> i64 { self.id }
///     fn attributes(&self) -> &Attributes { &self.attributes }
///     fn attributes_mut(&mut self) -> &mut Attributes { &mut self.attributes }
/// }
/// ```
pub trait Translatable {
    /// Owner type written to `translatable_type`
    const MODEL_TYPE: &'static str;

    /// Table holding the host records; locale filters correlate on its `id`
    const TABLE: &'static str;

    /// Attribute keys stored as translations
    const TRANSLATABLE: &'static [&'static str];

    /// Whether reads of a missing locale may fall back to another one
    const USE_FALLBACK_LOCALE: bool = true;

    fn id(&self) -> i64;

    fn attributes(&self) -> &Attributes;

    fn attributes_mut(&mut self) -> &mut Attributes;

    /// Per-model fallback locale, taking precedence over the configured one.
    fn fallback_locale(&self) -> Option<&str> {
        None
    }

    fn owner_ref(&self) -> OwnerRef {
        OwnerRef::new(Self::MODEL_TYPE, self.id())
    }

    fn translatable_attributes() -> &'static [&'static str] {
        Self::TRANSLATABLE
    }

    fn is_translatable_attribute(key: &str) -> bool {
        Self::TRANSLATABLE.contains(&key)
    }

    fn guard_translatable(key: &str) -> Result<()> {
        if Self::is_translatable_attribute(key) {
            Ok(())
        } else {
            Err(Error::not_translatable(key, Self::MODEL_TYPE))
        }
    }

    /// Filter for records of this type owning a `key` translation whose
    /// locale compares to `locale` with `operator` (equality when `None`).
    ///
    /// The filter matches on `{TABLE}.id`; use [`WhereLocale::on_column`]
    /// when the outer query aliases the host table.
    fn where_locale(
        config: &Config,
        key: &str,
        operator: Option<Operator>,
        locale: &str,
    ) -> Result<WhereLocale>
    where
        Self: Sized,
    {
        Self::guard_translatable(key)?;
        WhereLocale::new(
            &config.table,
            Self::MODEL_TYPE,
            &format!("{}.id", Self::TABLE),
            key,
            operator.unwrap_or_default(),
            locale,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Page {
        attributes: Attributes,
    }

    impl Translatable for Page {
        const MODEL_TYPE: &'static str = "page";
        const TABLE: &'static str = "pages";
        const TRANSLATABLE: &'static [&'static str] = &["title", "body"];
        const USE_FALLBACK_LOCALE: bool = false;

        fn id(&self) -> i64 {
            9
        }

        fn attributes(&self) -> &Attributes {
            &self.attributes
        }

        fn attributes_mut(&mut self) -> &mut Attributes {
            &mut self.attributes
        }

        fn fallback_locale(&self) -> Option<&str> {
            Some("id")
        }
    }

    #[test]
    fn test_declared_keys() {
        assert!(Page::is_translatable_attribute("title"));
        assert!(Page::is_translatable_attribute("body"));
        assert!(!Page::is_translatable_attribute("slug"));
        assert_eq!(Page::translatable_attributes(), &["title", "body"]);
    }

    #[test]
    fn test_guard_rejects_undeclared() {
        assert!(Page::guard_translatable("title").is_ok());
        let err = Page::guard_translatable("slug").expect_err("slug is plain");
        assert!(matches!(
            err,
            Error::AttributeIsNotTranslatable { ref key, ref model } if key == "slug" && model == "page"
        ));
    }

    #[test]
    fn test_owner_ref() {
        let page = Page {
            attributes: Attributes::new(),
        };
        assert_eq!(page.owner_ref(), OwnerRef::new("page", 9));
        assert_eq!(page.fallback_locale(), Some("id"));
    }

    #[test]
    fn test_where_locale_correlates_on_host_table() {
        let scope = Page::where_locale(&Config::default(), "title", None, "en").expect("scope");
        assert_eq!(scope.owner_column(), "pages.id");
    }

    #[test]
    fn test_where_locale_guards_key() {
        let config = Config::default();
        assert!(Page::where_locale(&config, "title", None, "en").is_ok());
        assert!(Page::where_locale(&config, "slug", None, "en").is_err());
    }
}
