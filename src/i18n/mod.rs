//! Internationalization (i18n): supported locales, language negotiation and
//! translation bundles.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for all supported locales
//! - `locale`: Validated `Locale` type built on the registry
//! - `negotiator`: Explicit `LanguageNegotiator` instance for cookie and
//!   `Accept-Language` matching
//! - `translator`: JSON translation bundles keyed by locale and namespace
//!
//! # Example
//!
//! ```rust,ignore
//! use personal_site::i18n::{LanguageNegotiator, Locale, Translator};
//!
//! let negotiator = LanguageNegotiator::from_registry();
//! let locale = negotiator.negotiate("en-US,en;q=0.9").unwrap_or(negotiator.fallback());
//!
//! let translator = Translator::load("locales")?;
//! let headline = translator.t(locale, "blogs", "headline");
//! ```

mod locale;
mod negotiator;
mod registry;
mod translator;

pub use locale::Locale;
pub use negotiator::LanguageNegotiator;
pub use registry::{LanguageConfig, LanguageRegistry};
pub use translator::{Translations, Translator};
