//! Picks which locale satisfies a read of a translatable attribute.

/// Resolve the locale to read from.
///
/// # Arguments
/// * `translated` - Locales that have a row for the attribute, in store order
/// * `requested` - Locale the caller asked for
/// * `use_fallback` - Whether to look beyond `requested` at all
/// * `fallback` - Configured fallback locale, if any
///
/// # Returns
/// `requested` when it has a row or fallback is off. Otherwise the fallback
/// locale when it has a row, then the first translated locale, and finally
/// `requested` again when nothing is translated.
pub fn resolve_locale<'a>(
    translated: &'a [String],
    requested: &'a str,
    use_fallback: bool,
    fallback: Option<&'a str>,
) -> &'a str {
    if translated.iter().any(|locale| locale == requested) {
        return requested;
    }

    if !use_fallback {
        return requested;
    }

    if let Some(fallback) = fallback {
        if translated.iter().any(|locale| locale == fallback) {
            return fallback;
        }
    }

    translated.first().map(String::as_str).unwrap_or(requested)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locales(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_requested_locale_present() {
        let translated = locales(&["en", "id"]);
        assert_eq!(resolve_locale(&translated, "id", true, Some("en")), "id");
    }

    #[test]
    fn test_fallback_disabled_keeps_requested() {
        let translated = locales(&["en", "id"]);
        assert_eq!(resolve_locale(&translated, "fr", false, Some("en")), "fr");
    }

    #[test]
    fn test_fallback_locale_used() {
        let translated = locales(&["id", "en"]);
        assert_eq!(resolve_locale(&translated, "fr", true, Some("en")), "en");
    }

    #[test]
    fn test_missing_fallback_uses_first_translated() {
        let translated = locales(&["id", "en"]);
        assert_eq!(resolve_locale(&translated, "fr", true, Some("de")), "id");
    }

    #[test]
    fn test_no_fallback_configured_uses_first_translated() {
        let translated = locales(&["en", "id"]);
        assert_eq!(resolve_locale(&translated, "fr", true, None), "en");
    }

    #[test]
    fn test_nothing_translated_keeps_requested() {
        assert_eq!(resolve_locale(&[], "fr", true, Some("en")), "fr");
    }
}
