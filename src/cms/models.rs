//! Response types of the content API.
//!
//! Resources come wrapped as `{ "data": { "id": .., "attributes": .. }, "meta": .. }`,
//! relations as `{ "data": .. }`. Every field defaults when missing so that a
//! half-filled entry in the CMS still renders.

use crate::content::{lenient, lenient_vec, ContentNode, ImageAsset};
use chrono::NaiveDate;
use serde::Deserialize;

// ============================================================================
// Envelope
// ============================================================================

/// Top-level response body.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub meta: Meta,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    #[serde(default, deserialize_with = "lenient")]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub page_count: u32,
    pub total: u32,
}

/// A stored entry: numeric id plus its attributes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Entity<T> {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub attributes: T,
}

/// A populated relation. `data` is null when nothing is linked.
#[derive(Debug, Clone, Deserialize)]
pub struct Relation<T> {
    pub data: Option<T>,
}

impl<T> Default for Relation<T> {
    fn default() -> Self {
        Self { data: None }
    }
}

pub type Media = Relation<Entity<ImageAsset>>;
pub type MediaList = Relation<Vec<Entity<ImageAsset>>>;
pub type Localizations = Relation<Vec<Entity<Localization>>>;

impl Media {
    pub fn asset(&self) -> Option<&ImageAsset> {
        self.data.as_ref().map(|entity| &entity.attributes)
    }
}

impl MediaList {
    pub fn assets(&self) -> impl Iterator<Item = &ImageAsset> {
        self.data.iter().flatten().map(|entity| &entity.attributes)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Localization {
    pub locale: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Keyword {
    pub keyword: String,
}

// ============================================================================
// Landing page
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LandingPage {
    pub title: String,
    pub introduction: String,
    pub locale: String,
    pub photo: Media,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Section {
    pub id: u64,
    pub title: String,
    pub text: String,
    pub coverimage: Media,
    pub call_to_action_route: String,
}

// ============================================================================
// Generic pages
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Page {
    pub locale: String,
    pub page_content: PageContent,
    pub localizations: Localizations,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PageContent {
    pub title: String,
    pub route: String,
    #[serde(deserialize_with = "lenient_vec")]
    pub content: Vec<ContentNode>,
    pub keywords: Vec<Keyword>,
}

// ============================================================================
// Blogs
// ============================================================================

/// A blog as listed on the overview pages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogSummary {
    pub title: String,
    pub author: String,
    pub date: String,
    pub teaser_text: String,
    pub coverimage: Media,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Blog {
    pub title: String,
    pub author: String,
    pub date: String,
    pub teaser_text: String,
    pub locale: String,
    #[serde(deserialize_with = "lenient_vec")]
    pub content: Vec<ContentNode>,
    pub coverimage: Media,
    pub attachments: MediaList,
    pub links: Vec<BlogLink>,
    pub keywords: Vec<Keyword>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BlogLink {
    pub url: String,
    pub alt: String,
    pub title: String,
}

// ============================================================================
// CV
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Cv {
    #[serde(deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub introduction: Option<String>,
    pub cv: Vec<CvEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CvEntry {
    pub id: u64,
    #[serde(deserialize_with = "lenient")]
    pub position: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub company: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub from: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient")]
    pub to: Option<NaiveDate>,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub id: u64,
    pub title: String,
}

// ============================================================================
// Legal / consent
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Legal {
    pub title: String,
    /// Name of the consent cookie
    pub cookie: String,
    pub intro: String,
    pub locale: String,
    pub updated_at: String,
    pub groups: Vec<LegalGroup>,
    pub localizations: Localizations,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LegalGroup {
    pub id: u64,
    pub title: String,
    pub cookie: String,
    pub items: Vec<LegalItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LegalItem {
    pub id: u64,
    pub title: String,
    pub cookie: String,
    #[serde(deserialize_with = "lenient_vec")]
    pub content: Vec<ContentNode>,
}

// ============================================================================
// Socials
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Social {
    pub title: String,
    pub url: String,
    /// Icon file name below `/static/icons/social/`
    pub icon: String,
    pub alt: String,
}
