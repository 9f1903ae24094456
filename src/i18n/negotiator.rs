//! Language negotiation against a fixed set of supported locales.
//!
//! The negotiator is an explicit value built at start-up and shared through
//! application state, so tests can construct their own with a different set.

use crate::i18n::Locale;

/// One entry of an `Accept-Language` style preference list.
#[derive(Debug, Clone, PartialEq)]
struct Preference<'a> {
    tag: &'a str,
    weight: f32,
}

/// Matches requested language tags against the supported locales.
#[derive(Debug, Clone)]
pub struct LanguageNegotiator {
    supported: Vec<Locale>,
    fallback: Locale,
}

impl LanguageNegotiator {
    /// Build a negotiator for the given locales.
    ///
    /// The fallback is the registry fallback if it is part of `supported`,
    /// otherwise the first supported locale.
    pub fn new(supported: Vec<Locale>) -> Self {
        let fallback = if supported.contains(&Locale::fallback()) || supported.is_empty() {
            Locale::fallback()
        } else {
            supported[0]
        };

        Self {
            supported,
            fallback,
        }
    }

    /// Negotiator over every registry locale.
    pub fn from_registry() -> Self {
        Self::new(Locale::all())
    }

    pub fn supported(&self) -> &[Locale] {
        &self.supported
    }

    pub fn fallback(&self) -> Locale {
        self.fallback
    }

    /// Exact match of a code (e.g., a path segment) against the supported set.
    pub fn exact(&self, code: &str) -> Option<Locale> {
        self.supported.iter().copied().find(|l| l.code() == code)
    }

    /// Pick the best supported locale for a preference list such as
    /// `"en-US,en;q=0.9,de;q=0.8"`. A bare tag ("es") is a one-entry list.
    ///
    /// Entries are tried by descending weight (ties keep header order). Each
    /// entry matches a supported code case-insensitively, first on the whole
    /// tag and then on its primary subtag. `*` matches the fallback. Entries
    /// with `q=0` are ignored.
    ///
    /// # Returns
    /// `None` when nothing in the list is supported.
    pub fn negotiate(&self, header: &str) -> Option<Locale> {
        let mut preferences = parse_preferences(header);
        preferences.sort_by(|a, b| {
            b.weight
                .partial_cmp(&a.weight)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        preferences
            .iter()
            .find_map(|preference| self.match_tag(preference.tag))
    }

    fn match_tag(&self, tag: &str) -> Option<Locale> {
        if tag == "*" {
            return Some(self.fallback);
        }

        let primary = tag.split(['-', '_']).next().unwrap_or(tag);

        self.supported
            .iter()
            .copied()
            .find(|l| l.code().eq_ignore_ascii_case(tag))
            .or_else(|| {
                self.supported
                    .iter()
                    .copied()
                    .find(|l| l.code().eq_ignore_ascii_case(primary))
            })
    }
}

impl Default for LanguageNegotiator {
    fn default() -> Self {
        Self::from_registry()
    }
}

fn parse_preferences(header: &str) -> Vec<Preference<'_>> {
    header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = parts.next()?.trim();
            if tag.is_empty() {
                return None;
            }

            let weight = parts
                .filter_map(|param| param.trim().strip_prefix("q="))
                .find_map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(1.0);

            (weight > 0.0).then_some(Preference { tag, weight })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(code: &str) -> Locale {
        Locale::from_code(code).expect("Test locale should exist")
    }

    // ==================== Parsing Tests ====================

    #[test]
    fn test_parse_single_tag() {
        let prefs = parse_preferences("en");
        assert_eq!(prefs, vec![Preference { tag: "en", weight: 1.0 }]);
    }

    #[test]
    fn test_parse_weights() {
        let prefs = parse_preferences("en-US, de;q=0.8 ,es;q=0.5");
        assert_eq!(prefs.len(), 3);
        assert_eq!(prefs[1], Preference { tag: "de", weight: 0.8 });
        assert_eq!(prefs[2], Preference { tag: "es", weight: 0.5 });
    }

    #[test]
    fn test_parse_skips_empty_and_zero_weight() {
        let prefs = parse_preferences(",,en;q=0, es");
        assert_eq!(prefs, vec![Preference { tag: "es", weight: 1.0 }]);
    }

    #[test]
    fn test_parse_invalid_weight_defaults_to_one() {
        let prefs = parse_preferences("es;q=abc");
        assert_eq!(prefs[0].weight, 1.0);
    }

    // ==================== Negotiation Tests ====================

    #[test]
    fn test_negotiate_exact_code() {
        let negotiator = LanguageNegotiator::from_registry();
        assert_eq!(negotiator.negotiate("en"), Some(locale("en")));
    }

    #[test]
    fn test_negotiate_region_subtag() {
        let negotiator = LanguageNegotiator::from_registry();
        assert_eq!(negotiator.negotiate("es-MX"), Some(locale("es")));
        assert_eq!(negotiator.negotiate("EN_gb"), Some(locale("en")));
    }

    #[test]
    fn test_negotiate_prefers_higher_weight() {
        let negotiator = LanguageNegotiator::from_registry();
        assert_eq!(
            negotiator.negotiate("en;q=0.4,es;q=0.9"),
            Some(locale("es"))
        );
    }

    #[test]
    fn test_negotiate_ties_keep_header_order() {
        let negotiator = LanguageNegotiator::from_registry();
        assert_eq!(negotiator.negotiate("es,en"), Some(locale("es")));
    }

    #[test]
    fn test_negotiate_skips_unsupported_entries() {
        let negotiator = LanguageNegotiator::from_registry();
        assert_eq!(
            negotiator.negotiate("fr-FR,fr;q=0.9,en;q=0.5"),
            Some(locale("en"))
        );
    }

    #[test]
    fn test_negotiate_unsupported_returns_none() {
        let negotiator = LanguageNegotiator::from_registry();
        assert_eq!(negotiator.negotiate("fr"), None);
        assert_eq!(negotiator.negotiate("jp"), None);
        assert_eq!(negotiator.negotiate(""), None);
    }

    #[test]
    fn test_negotiate_wildcard_is_fallback() {
        let negotiator = LanguageNegotiator::from_registry();
        assert_eq!(negotiator.negotiate("fr, *;q=0.1"), Some(locale("de")));
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_custom_set_without_registry_fallback() {
        let negotiator = LanguageNegotiator::new(vec![locale("en"), locale("es")]);
        assert_eq!(negotiator.fallback(), locale("en"));
        assert_eq!(negotiator.negotiate("de"), None);
    }

    #[test]
    fn test_exact_is_case_sensitive() {
        let negotiator = LanguageNegotiator::from_registry();
        assert_eq!(negotiator.exact("es"), Some(locale("es")));
        assert_eq!(negotiator.exact("ES"), None);
        assert_eq!(negotiator.exact(""), None);
    }
}
