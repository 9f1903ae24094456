//! HTML views rendered with maud.

mod blog;
pub mod components;
mod cv;
mod error;
mod home;
pub mod layout;
mod page;

pub use blog::{blog, blogs};
pub use cv::cv;
pub use error::error_page;
pub use home::home;
pub use layout::{LayoutContext, PageMeta};
pub use page::page;
