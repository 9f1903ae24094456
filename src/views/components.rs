//! Small building blocks shared by several pages.

use crate::content::{ImageAsset, ImageFormats};
use crate::i18n::Translations;
use maud::{html, Markup};

const CRUMB_MAX_CHARS: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconType {
    ArrowBack,
    ArrowForward,
    Menu,
    Person,
    Download,
    Event,
    Home,
    Save,
    Link,
    Close,
    Mail,
    Share,
    Month,
    External,
    Work,
    Location,
}

impl IconType {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconType::ArrowBack => "arrow_back",
            IconType::ArrowForward => "arrow_forward",
            IconType::Menu => "menu",
            IconType::Person => "person",
            IconType::Download => "download",
            IconType::Event => "event",
            IconType::Home => "home",
            IconType::Save => "save",
            IconType::Link => "link",
            IconType::Close => "close",
            IconType::Mail => "mail",
            IconType::Share => "share",
            IconType::Month => "month",
            IconType::External => "external",
            IconType::Work => "work",
            IconType::Location => "location",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AriaRole {
    Presentation,
    Img,
}

/// A CSS-drawn icon. Only `img` icons get an `aria-label`.
pub fn icon(kind: IconType, role: AriaRole, text: &str) -> Markup {
    icon_with_hover(kind, role, text, false)
}

pub fn icon_with_hover(kind: IconType, role: AriaRole, text: &str, hover: bool) -> Markup {
    let class = if hover {
        format!("icon_svg icon_{} icon_hover__effect", kind.as_str())
    } else {
        format!("icon_svg icon_{}", kind.as_str())
    };

    html! {
        @match role {
            AriaRole::Presentation => {
                div class=(class) role="presentation" {}
            }
            AriaRole::Img => {
                div class=(class) role="img" aria-label=(text) {}
            }
        }
    }
}

/// One breadcrumb. Crumbs with an icon show the icon instead of the title.
#[derive(Debug, Clone)]
pub struct Crumb {
    pub title: String,
    pub url: Option<String>,
    pub icon: Option<IconType>,
}

impl Crumb {
    pub fn home(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: Some(url.into()),
            icon: Some(IconType::Home),
        }
    }

    pub fn current(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: None,
            icon: None,
        }
    }
}

/// Shorten a breadcrumb title to 15 characters plus `...`.
pub fn truncate_crumb(text: &str) -> String {
    if text.chars().count() > CRUMB_MAX_CHARS {
        let mut short: String = text.chars().take(CRUMB_MAX_CHARS).collect();
        short.push_str("...");
        short
    } else {
        text.to_string()
    }
}

pub fn breadcrumbs(crumbs: &[Crumb], current: Option<&Crumb>) -> Markup {
    html! {
        nav.breadcrumbs__container aria-label="breadcrumb" {
            @for crumb in crumbs {
                span.breadcrumbs__element {
                    a href=(crumb.url.as_deref().unwrap_or("#")) {
                        @if let Some(kind) = crumb.icon {
                            (icon(kind, AriaRole::Presentation, &crumb.title))
                        } @else {
                            (truncate_crumb(&crumb.title))
                        }
                    }
                }
                @if current.is_some() {
                    span.breadcrumbs__element { span { ">" } }
                }
            }
            @if let Some(current) = current {
                span.breadcrumbs__element { (truncate_crumb(&current.title)) }
            }
        }
    }
}

/// Page links for `/<lng>/<route>/<n>`. Renders nothing for a single page.
pub fn pagination(
    lng: &str,
    route: &str,
    current_page: u32,
    page_count: u32,
    icons: &Translations<'_>,
) -> Markup {
    if page_count <= 1 {
        return html! {};
    }

    let back = icons.t("arrow_back");
    let forward = icons.t("arrow_forward");

    html! {
        div.pagination_wrapper {
            @if current_page > 1 {
                a.pagination__link href={ "/" (lng) "/" (route) "/" (current_page - 1) } title=(back) {
                    (icon(IconType::ArrowBack, AriaRole::Presentation, &back))
                }
            }
            @for idx in 1..=page_count {
                @if idx == current_page {
                    div.active__page tabindex="-1" { (idx) }
                } @else {
                    a.pagination_navlink href={ "/" (lng) "/" (route) "/" (idx) } tabindex="0" {
                        div tabindex="-1" { (idx) }
                    }
                }
            }
            @if current_page < page_count {
                a.pagination__link href={ "/" (lng) "/" (route) "/" (current_page + 1) } title=(forward) {
                    (icon(IconType::ArrowForward, AriaRole::Presentation, &forward))
                }
            }
        }
    }
}

/// `<img>` for an optional asset using the picked variant; nothing without an asset.
pub fn responsive_image(
    asset: Option<&ImageAsset>,
    class: &str,
    pick: fn(&ImageFormats) -> Option<&crate::content::ImageFormat>,
) -> Markup {
    html! {
        @if let Some(asset) = asset {
            img class=(class)
                src=(asset.variant_url(pick))
                alt=(asset.alternative_text.as_deref().or(asset.name.as_deref()).unwrap_or(""))
                loading="lazy";
        }
    }
}
