//! Multi-language image captions.
//!
//! The CMS has a single caption field per image, so translations are packed
//! into it as `en:"Hello";de:"Hallo"`.

use crate::i18n::Locale;

/// Split a packed caption into `(locale code, text)` pairs, in input order.
///
/// Quotes are dropped anywhere in a pair. Only the first `:` separates the
/// code from the text, so the text may itself contain colons. Pairs without a
/// `:` are ignored.
pub fn parse(caption: &str) -> Vec<(String, String)> {
    caption
        .split(';')
        .map(|pair| pair.trim().replace('"', ""))
        .filter_map(|pair| {
            // `de:Uhrzeit: 10:30` keeps `Uhrzeit: 10:30`, not just `Uhrzeit`.
            pair.split_once(':')
                .map(|(code, text)| (code.trim().to_string(), text.trim().to_string()))
        })
        .collect()
}

/// The caption text for `locale`, or `""` when there is none.
pub fn select(caption: &str, locale: Locale) -> String {
    parse(caption)
        .into_iter()
        .find(|(code, _)| code == locale.code())
        .map(|(_, text)| text)
        .unwrap_or_default()
}
