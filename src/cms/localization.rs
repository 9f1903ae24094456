//! Picking the right language version of a localized CMS entry.
//!
//! Filtered queries return the entry in its default locale together with the
//! ids of its translations. If the visitor's locale is one of those, the
//! translation has to be fetched separately by id.

use crate::cms::models::{Entity, Localization};
use crate::i18n::Locale;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalizedChoice {
    /// The entry that was returned is the one to show.
    Default,
    /// Fetch the translation with this id.
    Localized(u64),
}

pub fn select_localization(
    default_locale: &str,
    localizations: &[Entity<Localization>],
    requested: Locale,
) -> LocalizedChoice {
    if default_locale == requested.code() {
        return LocalizedChoice::Default;
    }

    localizations
        .iter()
        .find(|l| l.attributes.locale == requested.code())
        .map(|l| LocalizedChoice::Localized(l.id))
        .unwrap_or(LocalizedChoice::Default)
}
