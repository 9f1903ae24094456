//! Structured rich-text documents from the CMS and their HTML rendering.

pub mod caption;
mod model;
mod render;

pub use model::{
    ContentNode, ImageAsset, ImageFormat, ImageFormats, InlineElement, InlineKind, InlineStyle,
    ListFormat, Marks,
};
pub use render::{render_content, render_document, CodeTranslation, PageContext, RenderOptions};

pub(crate) use model::{lenient, lenient_vec};
