//! Translation bundles: per-locale, per-namespace key/string lookup.
//!
//! Bundles live on disk as `<dir>/<locale>/<namespace>.json`. Nested JSON
//! objects are flattened into dotted keys. Lookups fall back to the fallback
//! locale and finally to the key itself, so a missing string is visible on the
//! page instead of breaking it.

use crate::i18n::Locale;
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, warn};

type Bundle = HashMap<String, String>;

#[derive(Debug, Clone, Default)]
pub struct Translator {
    bundles: HashMap<(Locale, String), Bundle>,
}

impl Translator {
    /// A translator without any bundles; every lookup returns its key.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load every bundle for every supported locale below `dir`.
    ///
    /// Missing locale directories are logged and skipped. Unreadable or
    /// invalid JSON files are an error.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut translator = Self::empty();

        for locale in Locale::all() {
            let locale_dir = dir.join(locale.code());
            if !locale_dir.is_dir() {
                warn!("No translation directory for '{}' at {}", locale, locale_dir.display());
                continue;
            }

            let entries = std::fs::read_dir(&locale_dir)
                .with_context(|| format!("Failed to read {}", locale_dir.display()))?;

            for entry in entries {
                let path = entry?.path();
                if path.extension().and_then(|e| e.to_str()) != Some("json") {
                    continue;
                }
                let Some(namespace) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };

                let raw = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                translator
                    .add_bundle(locale, namespace, &raw)
                    .with_context(|| format!("Invalid translation bundle {}", path.display()))?;
                debug!("Loaded translation bundle {}/{}", locale, namespace);
            }
        }

        Ok(translator)
    }

    /// Add (or merge into) the bundle for `locale`/`namespace` from JSON text.
    pub fn add_bundle(&mut self, locale: Locale, namespace: &str, json: &str) -> Result<()> {
        let value: Value = serde_json::from_str(json)?;
        let bundle = self
            .bundles
            .entry((locale, namespace.to_string()))
            .or_default();
        flatten_into(bundle, None, &value);
        Ok(())
    }

    /// Look up `key` in `namespace` for `locale`.
    pub fn t(&self, locale: Locale, namespace: &str, key: &str) -> String {
        self.lookup(locale, namespace, key)
            .or_else(|| self.lookup(Locale::fallback(), namespace, key))
            .map(str::to_string)
            .unwrap_or_else(|| key.to_string())
    }

    /// Bind a locale and namespace for repeated lookups.
    pub fn namespace<'a>(&'a self, locale: Locale, namespace: &'a str) -> Translations<'a> {
        Translations {
            translator: self,
            locale,
            namespace,
        }
    }

    fn lookup(&self, locale: Locale, namespace: &str, key: &str) -> Option<&str> {
        self.bundles
            .get(&(locale, namespace.to_string()))
            .and_then(|bundle| bundle.get(key))
            .map(String::as_str)
    }
}

/// A translator bound to one locale and namespace.
#[derive(Debug, Clone, Copy)]
pub struct Translations<'a> {
    translator: &'a Translator,
    locale: Locale,
    namespace: &'a str,
}

impl Translations<'_> {
    pub fn t(&self, key: &str) -> String {
        self.translator.t(self.locale, self.namespace, key)
    }
}

fn flatten_into(bundle: &mut Bundle, prefix: Option<&str>, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                let full_key = match prefix {
                    Some(p) => format!("{}.{}", p, key),
                    None => key.clone(),
                };
                flatten_into(bundle, Some(&full_key), nested);
            }
        }
        Value::String(s) => {
            if let Some(key) = prefix {
                bundle.insert(key.to_string(), s.clone());
            }
        }
        Value::Null => {}
        other => {
            if let Some(key) = prefix {
                bundle.insert(key.to_string(), other.to_string());
            }
        }
    }
}
