use crate::cms::models::{LandingPage, Section};
use crate::views::components::responsive_image;
use crate::views::layout::{self, LayoutContext, PageMeta};
use maud::{html, Markup};

/// Landing page: hero block plus one card per section.
pub fn home(ctx: &LayoutContext<'_>, landing: &LandingPage) -> Markup {
    let lng = ctx.locale.code();
    let photo = landing.photo.asset();
    let meta = PageMeta::site(&ctx.t("common"), "");

    let content = html! {
        div.page_wrapper {
            section.hero_section tabindex="-1" {
                div.hero_wrapper__left {
                    h1.gradient_heading.gradient_font.hero_headline { (landing.title) }
                    p.hero_text { (landing.introduction) }
                }
                div.hero_picture {
                    @if let Some(photo) = photo {
                        img src=(photo.variant_url(|f| f.medium.as_ref()))
                            alt=(photo.alternative_text.as_deref().unwrap_or(""))
                            title=(photo.caption.as_deref().unwrap_or(""))
                            width="500" height="500";
                    }
                }
            }
            div.page_card_wrapper {
                @for section in &landing.sections {
                    (section_card(lng, section))
                }
            }
        }
    };

    layout::page(ctx, &meta, content)
}

fn section_card(lng: &str, section: &Section) -> Markup {
    html! {
        a.card_link.page_card href={ "/" (lng) "/" (section.call_to_action_route) } title=(section.title) {
            (responsive_image(section.coverimage.asset(), "card_image", |f| f.medium.as_ref()))
            div.card_content {
                h2.card_title { (section.title) }
                p.card_text { (section.text) }
            }
        }
    }
}
