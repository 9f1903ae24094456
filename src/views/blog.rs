//! Blog overview and blog detail pages.

use crate::cms::models::{Blog, BlogSummary, Entity, Pagination};
use crate::content::{render_document, PageContext};
use crate::views::components::{
    breadcrumbs, icon, pagination, responsive_image, AriaRole, Crumb, IconType,
};
use crate::views::layout::{self, LayoutContext, PageMeta};
use maud::{html, Markup};

/// One page of the blog overview.
pub fn blogs(
    ctx: &LayoutContext<'_>,
    entries: &[Entity<BlogSummary>],
    page_info: &Pagination,
) -> Markup {
    let t = ctx.t("blogs");
    let common = ctx.t("common");
    let icons = ctx.t("icons");
    let lng = ctx.locale.code();
    let paginated = page_info.page_count > 1;

    let headline = if paginated {
        format!("{} - {} {}", t.t("headline"), t.t("site"), page_info.page)
    } else {
        t.t("headline")
    };

    let meta = PageMeta::site(&common, "/blogs").with_title(format!(
        "{} {} {}",
        common.t("meta-common-page-title-prefix"),
        t.t("headline"),
        common.t("meta-common-page-title-suffix")
    ));

    let content = html! {
        div.blogspage {
            (breadcrumbs(
                &[Crumb::home(t.t("home"), format!("/{}", lng))],
                Some(&Crumb::current(t.t("crumbs-headline"))),
            ))
            h1 { (headline) }
            (pagination(lng, "blogs", page_info.page, page_info.page_count, &icons))
            br;
            div.blogcards_wrapper {
                @for entry in entries {
                    (blog_card(ctx, entry))
                }
            }
            br;
            (pagination(lng, "blogs", page_info.page, page_info.page_count, &icons))
        }
    };

    layout::page(ctx, &meta, content)
}

fn blog_card(ctx: &LayoutContext<'_>, entry: &Entity<BlogSummary>) -> Markup {
    let t = ctx.t("blogs");
    let icons = ctx.t("icons");
    let blog = &entry.attributes;

    html! {
        a.blogcard_wrapper href={ "/" (ctx.locale.code()) "/blog/" (entry.id) } title=(t.t("readme")) {
            div.blogcard_image_container {
                (responsive_image(blog.coverimage.asset(), "blogcard_image", |f| f.medium.as_ref()))
            }
            div.blogcard_content {
                h2.gradient_font { (blog.title) }
                div.blogcard_meta_wrapper {
                    div.blogcard_meta_item {
                        (icon(IconType::Person, AriaRole::Presentation, &icons.t("person")))
                        div.blogcard_meta_text { (blog.author) }
                    }
                    div.blogcard_meta_item {
                        (icon(IconType::Event, AriaRole::Presentation, &icons.t("event")))
                        div.blogcard_meta_text { (blog.date) }
                    }
                }
                p.blogcard_teaser { (blog.teaser_text) }
            }
        }
    }
}

/// A single blog post.
pub fn blog(ctx: &LayoutContext<'_>, id: u64, blog: &Blog) -> Markup {
    let common = ctx.t("common");
    let icons = ctx.t("icons");
    let lng = ctx.locale.code();
    let cover = blog.coverimage.asset();
    let permalink = format!("{}/{}/blog/{}", ctx.site_base_url, lng, id);

    let meta = PageMeta {
        title: format!(
            "Blog > {} {}",
            blog.title,
            common.t("meta-common-page-title-suffix")
        ),
        description: blog.teaser_text.clone(),
        keywords: blog.keywords.iter().map(|k| k.keyword.clone()).collect(),
        author: Some(blog.author.clone()).filter(|a| !a.is_empty()),
        og_type: "article",
        image: cover
            .map(|c| c.variant_url(|f| f.medium.as_ref()).to_string())
            .filter(|url| !url.is_empty()),
        path: format!("/blog/{}", id),
    };

    let attachments: Vec<_> = blog.attachments.assets().collect();

    let content = html! {
        div.blogpage {
            div.cover_container {
                @if let Some(cover) = cover {
                    img.coverimage
                        src=(cover.variant_url(|f| f.large.as_ref()))
                        alt={ "coverimage " (cover.name.as_deref().unwrap_or("")) }
                        width="1400" height="600";
                }
            }
            div.content_wrapper {
                div.title {
                    (blog.title)
                    a.share_button href=(permalink) data-share-title=(blog.title) tabindex="0" {
                        (icon(IconType::Share, AriaRole::Presentation, &common.t("share")))
                    }
                }
                div.flex_wrapper {
                    div.flex_inline {
                        (icon(IconType::Person, AriaRole::Presentation, &icons.t("person")))
                        div.meta_text { (blog.author) }
                    }
                    div.flex_inline {
                        (icon(IconType::Event, AriaRole::Presentation, &icons.t("event")))
                        div.meta_text { (blog.date) }
                    }
                }
                (render_document(&blog.content, &ctx.render_options(PageContext::Blog)))
                @if !attachments.is_empty() {
                    div.flex_wrapper {
                        h2 { (common.t("attachments-headline")) }
                        @for attachment in &attachments {
                            a.attachments_wrapper href=(attachment.url.as_deref().unwrap_or("")) target="_blank" {
                                (icon(IconType::Save, AriaRole::Img, &icons.t("save")))
                                div.attachments_list_item { (attachment.name.as_deref().unwrap_or("")) }
                            }
                        }
                    }
                }
                @if !blog.links.is_empty() {
                    div.flex_wrapper {
                        h2 { (common.t("links-headline")) }
                        @for link in &blog.links {
                            a.links_wrapper href=(link.url) target="_blank" title=(link.alt) {
                                (icon(IconType::Link, AriaRole::Img, &icons.t("link")))
                                div.link_list_item { (link.title) }
                            }
                        }
                    }
                }
            }
        }
    };

    layout::page(ctx, &meta, content)
}
