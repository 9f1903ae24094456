//! Locale type: a validated member of the language registry.

use crate::i18n::{LanguageConfig, LanguageRegistry};
use anyhow::{bail, Result};
use std::fmt;

/// A supported locale.
///
/// Only codes present in the registry can be turned into a `Locale`, so any
/// value of this type is guaranteed to be servable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Locale {
    code: &'static str,
}

impl Locale {
    /// Create a Locale from an exact language code.
    ///
    /// # Returns
    /// * `Ok(Locale)` if the code is in the registry
    /// * `Err` for unknown codes
    pub fn from_code(code: &str) -> Result<Locale> {
        match LanguageRegistry::get().get_by_code(code) {
            Some(config) => Ok(Locale { code: config.code }),
            None => bail!("Unknown language code: '{}'", code),
        }
    }

    /// The locale unsupported inputs degrade to.
    pub fn fallback() -> Locale {
        Locale {
            code: LanguageRegistry::get().fallback().code,
        }
    }

    /// Every supported locale, in registry order.
    pub fn all() -> Vec<Locale> {
        LanguageRegistry::get()
            .list()
            .iter()
            .map(|config| Locale { code: config.code })
            .collect()
    }

    /// The ISO 639-1 code (e.g., "de").
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Full registry entry for this locale.
    ///
    /// # Panics
    /// Never for values built through this module's constructors.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Locale code should always be registered")
    }

    pub fn is_fallback(&self) -> bool {
        self.config().is_fallback
    }

    /// Text direction for the `dir` attribute. All supported locales are
    /// left-to-right.
    pub fn dir(&self) -> &'static str {
        "ltr"
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::fallback()
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code)
    }
}
