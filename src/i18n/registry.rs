//! Language registry: single source of truth for all supported locales.
//!
//! The registry is immutable static data initialized once through `OnceLock`.
//! Anything that needs configuration beyond the list itself (negotiation,
//! translation bundles) is built as an explicit instance on top of it.

use std::sync::OnceLock;

/// Metadata for a supported locale.
#[derive(Debug, Clone)]
pub struct LanguageConfig {
    /// ISO 639-1 language code (e.g., "de", "en")
    pub code: &'static str,

    /// Whether unsupported or missing inputs degrade to this locale
    /// (exactly one entry must be true)
    pub is_fallback: bool,
}

/// Global language registry singleton.
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| LanguageRegistry {
            languages: default_languages(),
        })
    }

    /// Get a language configuration by its exact code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// All supported languages, in registry order (fallback first).
    pub fn list(&self) -> &[LanguageConfig] {
        &self.languages
    }

    /// Get the fallback language configuration.
    ///
    /// # Panics
    /// Panics if the registry does not define exactly one fallback language
    /// (a configuration error in `default_languages`).
    pub fn fallback(&self) -> &LanguageConfig {
        let fallbacks: Vec<_> = self
            .languages
            .iter()
            .filter(|lang| lang.is_fallback)
            .collect();

        match fallbacks.len() {
            0 => panic!("No fallback language found in registry"),
            1 => fallbacks[0],
            _ => panic!("Multiple fallback languages found in registry"),
        }
    }

    /// Check if a language code is supported.
    pub fn is_supported(&self, code: &str) -> bool {
        self.get_by_code(code).is_some()
    }
}

/// Supported locales: German (fallback), English and Spanish.
fn default_languages() -> Vec<LanguageConfig> {
    vec![
        LanguageConfig {
            code: "de",
            is_fallback: true,
        },
        LanguageConfig {
            code: "en",
            is_fallback: false,
        },
        LanguageConfig {
            code: "es",
            is_fallback: false,
        },
    ]
}
