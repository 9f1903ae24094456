//! `sitemap.xml` and `robots.txt`.

use crate::i18n::Locale;
use chrono::NaiveDate;
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Weekly,
    Monthly,
    Yearly,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub url: String,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// Every locale × (home, imprint, cv, about, blogs). The fallback locale's
/// about and blog pages rank slightly higher.
pub fn sitemap_entries(base_url: &str) -> Vec<SitemapEntry> {
    let mut entries = Vec::new();

    for locale in Locale::all() {
        let primary = locale.is_fallback();
        let pages = [
            ("", ChangeFrequency::Yearly, 1.0),
            ("/page/imprint", ChangeFrequency::Monthly, 0.9),
            ("/cv", ChangeFrequency::Monthly, 0.8),
            ("/page/about", ChangeFrequency::Monthly, if primary { 0.7 } else { 0.8 }),
            ("/blogs", ChangeFrequency::Weekly, if primary { 0.9 } else { 0.8 }),
        ];

        for (path, change_frequency, priority) in pages {
            entries.push(SitemapEntry {
                url: format!("{}/{}{}", base_url, locale.code(), path),
                change_frequency,
                priority,
            });
        }
    }

    entries
}

pub fn sitemap_xml(base_url: &str, last_modified: NaiveDate) -> String {
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for entry in sitemap_entries(base_url) {
        let _ = write!(
            xml,
            "<url>\n<loc>{}</loc>\n<lastmod>{}</lastmod>\n<changefreq>{}</changefreq>\n<priority>{:.1}</priority>\n</url>\n",
            escape_xml(&entry.url),
            last_modified.format("%Y-%m-%d"),
            entry.change_frequency.as_str(),
            entry.priority
        );
    }

    xml.push_str("</urlset>\n");
    xml
}

pub fn robots_txt(base_url: &str) -> String {
    format!("User-Agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n", base_url)
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
