pub mod cms;
pub mod config;
pub mod consent;
pub mod content;
pub mod error;
pub mod i18n;
pub mod middleware;
pub mod retry;
pub mod seo;
pub mod views;
pub mod web;
