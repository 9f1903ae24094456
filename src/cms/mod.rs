//! Read-only access to the headless content API.

mod client;
mod localization;
pub mod models;

pub use client::{BlogPage, CmsClient};
pub use localization::{select_localization, LocalizedChoice};
