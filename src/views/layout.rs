//! Page shell shared by every locale-prefixed page.

use crate::cms::models::{Legal, LegalGroup, LegalItem, Social};
use crate::consent::{field_name, ConsentState, GROUP_WILDCARD};
use crate::content::{render_document, CodeTranslation, PageContext, RenderOptions};
use crate::i18n::{Locale, Translations, Translator};
use crate::views::components::{icon, AriaRole, IconType};
use maud::{html, Markup, PreEscaped, DOCTYPE};
use url::Url;

const FAVICON_DIR: &str = "/favicon/";

const PLAUSIBLE_SCRIPT: &str = "https://plausible.io/js/script.js";

/// Everything the shell needs besides the page body.
pub struct LayoutContext<'a> {
    pub locale: Locale,
    pub translator: &'a Translator,
    pub site_base_url: &'a str,
    pub contact_email: Option<&'a str>,
    pub socials: &'a [Social],
    pub legal: Option<&'a Legal>,
    /// `None` when the visitor has not made a consent decision yet.
    pub consent: Option<&'a ConsentState>,
}

impl<'a> LayoutContext<'a> {
    pub fn t(&self, namespace: &'a str) -> Translations<'a> {
        self.translator.namespace(self.locale, namespace)
    }

    pub fn code_translation(&self) -> CodeTranslation {
        CodeTranslation::from_translator(self.translator, self.locale)
    }

    pub fn render_options(&self, context: PageContext) -> RenderOptions {
        RenderOptions {
            context,
            locale: self.locale,
            code: self.code_translation(),
        }
    }
}

/// Document metadata for `<head>`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub author: Option<String>,
    /// Open Graph type, `website` or `article`.
    pub og_type: &'static str,
    pub image: Option<String>,
    /// Path below the locale prefix, e.g. `/cv`. Used for alternates.
    pub path: String,
}

impl PageMeta {
    /// Site-wide defaults from the `common` namespace.
    pub fn site(t: &Translations<'_>, path: impl Into<String>) -> Self {
        Self {
            title: t.t("meta-title"),
            description: t.t("meta-description"),
            keywords: split_keywords(&t.t("meta-keywords")),
            author: None,
            og_type: "website",
            image: None,
            path: path.into(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

pub fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

/// Wrap `content` in the full HTML document.
pub fn page(ctx: &LayoutContext<'_>, meta: &PageMeta, content: Markup) -> Markup {
    let lng = ctx.locale.code();

    html! {
        (DOCTYPE)
        html lang=(lng) dir=(ctx.locale.dir()) {
            (head(ctx, meta))
            body {
                div.mainWrapper {
                    div.contentWrapper {
                        header { (navigation(ctx)) }
                        main { (content) }
                    }
                    (footer(ctx))
                }
                @if let Some(legal) = ctx.legal {
                    (legal_banner(ctx, legal))
                }
            }
        }
    }
}

fn head(ctx: &LayoutContext<'_>, meta: &PageMeta) -> Markup {
    let common = ctx.t("common");
    let author = meta.author.clone().unwrap_or_else(|| common.t("meta-author"));
    let site_name = common.t("meta-site-name");

    html! {
        head {
            meta charset="UTF-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            title { (meta.title) }
            meta name="description" content=(meta.description);
            @if !meta.keywords.is_empty() {
                meta name="keywords" content=(meta.keywords.join(", "));
            }
            meta name="author" content=(author);
            meta name="application-name" content=(site_name);
            meta name="referrer" content="origin-when-cross-origin";
            meta name="robots" content="all";
            meta property="og:title" content=(meta.title);
            meta property="og:description" content=(meta.description);
            meta property="og:type" content=(meta.og_type);
            meta property="og:locale" content=(ctx.locale.code());
            meta property="og:site_name" content=(site_name);
            @if let Some(image) = &meta.image {
                meta property="og:image" content=(image);
            }
            @for locale in Locale::all() {
                link rel="alternate" hreflang=(locale.code())
                    href={ (ctx.site_base_url) "/" (locale.code()) (meta.path) };
            }
            (favicon())
            link rel="stylesheet" href="/static/site.css";
            script src="/static/copy.js" defer {}
            (analytics(ctx))
        }
    }
}

/// Plausible, loaded only after the visitor opted in to `analytics.plausible`.
fn analytics(ctx: &LayoutContext<'_>) -> Markup {
    let consented = ctx
        .consent
        .is_some_and(|c| c.is_checked("analytics", "plausible"));
    let domain = Url::parse(ctx.site_base_url)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string));

    html! {
        @if let (true, Some(domain)) = (consented, domain) {
            script defer data-domain=(domain) src=(PLAUSIBLE_SCRIPT) {}
        }
    }
}

fn favicon() -> Markup {
    html! {
        link rel="icon" type="image/x-icon" href={ (FAVICON_DIR) "favicon.ico" };
        link rel="apple-touch-icon" sizes="180x180" href={ (FAVICON_DIR) "apple-touch-icon.png" };
        link rel="icon" type="image/png" sizes="32x32" href={ (FAVICON_DIR) "favicon-32x32.png" };
        link rel="icon" type="image/png" sizes="16x16" href={ (FAVICON_DIR) "favicon-16x16.png" };
        link rel="manifest" href={ (FAVICON_DIR) "site.webmanifest" };
        link rel="mask-icon" href={ (FAVICON_DIR) "safari-pinned-tab.svg" } color="#5bbad5";
        meta name="msapplication-TileColor" content="#ffc40d";
        meta name="theme-color" content="#ffffff";
    }
}

fn navigation(ctx: &LayoutContext<'_>) -> Markup {
    let t = ctx.t("nav");
    let lng = ctx.locale.code();
    let menu = [
        ("", t.t("home")),
        ("page/about", t.t("about")),
        ("cv", t.t("cv")),
        ("blogs", t.t("blogs")),
    ];

    html! {
        nav.navMenu {
            @if let Some(email) = ctx.contact_email {
                a.navIcon.left_nav
                    href={ "mailto:" (email) "?subject=" (urlencoding::encode(&t.t("mailto-subject"))) }
                    tabindex="0" {
                    (icon(IconType::Mail, AriaRole::Img, &t.t("mail")))
                }
            }
            a.box.mid_nav href={ "/" (lng) } tabindex="0" {
                img src="/img/logo_short.svg" alt="logo" width="100" height="100";
            }
            input.nav-toggle type="checkbox" id="nav-toggle";
            label.navIcon.right_nav for="nav-toggle" tabindex="0" {
                (icon(IconType::Menu, AriaRole::Img, &t.t("menu")))
            }
            ul #nav_items.nav_wrapper {
                @for (suffix, title) in &menu {
                    li.nav_item {
                        a.menuLink href={ "/" (lng) "/" (suffix) } title=(title) tabindex="0" { (title) }
                    }
                }
            }
        }
    }
}

fn footer(ctx: &LayoutContext<'_>) -> Markup {
    let t = ctx.t("footer");
    let lng = ctx.locale.code();

    html! {
        div.footerWrapper {
            footer.footer {
                div.grid_social { (socials(ctx.socials)) }
                div.grid_translation { (language_switcher(ctx.locale, &t)) }
                div.grid_links {
                    a href={ "/" (lng) "/page/imprint" } title=(t.t("imprint")) { (t.t("imprint")) }
                    @if ctx.legal.is_some() {
                        a.legal__link href="#legal-banner" tabindex="0" { (t.t("cookie")) }
                    }
                }
                div.grid_copyright {
                    div.grid_credits { (PreEscaped("&copy;&nbsp;")) (t.t("copyright")) }
                }
            }
            div.gradient_line {}
        }
    }
}

pub fn socials(socials: &[Social]) -> Markup {
    html! {
        div.socialsWrapper {
            @for social in socials {
                div {
                    a.socialLink href=(social.url) target="_blank" rel="noreferrer" title=(social.alt) tabindex="0" {
                        img.socialIcon
                            src={ "/icons/social/" (social.icon) ".svg" }
                            alt={ "Follow me on " (social.alt) }
                            height="35" width="35" role="link" tabindex="-1";
                    }
                }
            }
        }
    }
}

/// Current locale highlighted, every other one linked as `/<code>`.
pub fn language_switcher(current: Locale, t: &Translations<'_>) -> Markup {
    let others: Vec<Locale> = Locale::all().into_iter().filter(|l| *l != current).collect();

    html! {
        div.languageSwitcher {
            span.chosenLang { (t.t(current.code())) }
            " | "
            @for (index, other) in others.iter().enumerate() {
                span {
                    @if index > 0 { " | " }
                    a.lang__link href={ "/" (other.code()) }
                        title=(t.t(&format!("{}-long", other.code())))
                        hreflang=(other.code()) tabindex="0" {
                        (t.t(other.code()))
                    }
                }
            }
        }
    }
}

/// Consent dialog. Shown open until the visitor has decided.
fn legal_banner(ctx: &LayoutContext<'_>, legal: &Legal) -> Markup {
    let t = ctx.t("legal");
    let empty = ConsentState::default();
    let consent = ctx.consent.unwrap_or(&empty);
    let hidden = if ctx.consent.is_some() { "true" } else { "false" };

    html! {
        div #legal-banner.legal__banner aria-hidden=(hidden) {
            div.banner__backdrop tabindex="-1" {}
            form.banner_wrapper method="post" action={ "/" (ctx.locale.code()) "/legal/consent" } {
                div.banner__header {
                    div.banner__title tabindex="-1" { (legal.title) }
                    button.banner__close type="submit" name="action" value="close" {
                        (icon(IconType::Close, AriaRole::Img, &t.t("close")))
                    }
                }
                p.banner__intro { (legal.intro) }
                @for group in &legal.groups {
                    (legal_group(ctx, group, consent, &t))
                }
                div.banner__button_row {
                    button type="submit" name="action" value="accept-all" { (t.t("accept-all")) }
                    button type="submit" name="action" value="save" { (t.t("save")) }
                    button type="submit" name="action" value="deny-all" { (t.t("deny-all")) }
                }
            }
        }
    }
}

fn legal_group(
    ctx: &LayoutContext<'_>,
    group: &LegalGroup,
    consent: &ConsentState,
    t: &Translations<'_>,
) -> Markup {
    html! {
        div.banner__group tabindex="-1" {
            h2.banner__title { (group.title) }
            label.banner__checkbox {
                input type="checkbox" name=(field_name(&group.cookie, GROUP_WILDCARD))
                    checked[consent.group_all_true(group)];
                (t.t("accept-all")) ": \"" (group.title) "\""
            }
            ul.banner__group_list {
                @for item in &group.items {
                    (legal_item(ctx, &group.cookie, item, consent, t))
                }
            }
        }
    }
}

fn legal_item(
    ctx: &LayoutContext<'_>,
    group: &str,
    item: &LegalItem,
    consent: &ConsentState,
    t: &Translations<'_>,
) -> Markup {
    html! {
        li.accordion tabindex="-1" {
            details {
                summary.accordion__title { (item.title) }
                div.accordion__content {
                    (render_document(&item.content, &ctx.render_options(PageContext::Blog)))
                    label.banner__checkbox {
                        input type="checkbox" name=(field_name(group, &item.cookie))
                            checked[consent.is_checked(group, &item.cookie)];
                        (t.t("accept"))
                    }
                }
            }
        }
    }
}
