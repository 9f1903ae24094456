use crate::cms::models::Page;
use crate::content::{render_document, PageContext};
use crate::views::layout::{self, LayoutContext, PageMeta};
use maud::{html, Markup};

/// Generic CMS page. `None` renders an empty page with the site defaults.
pub fn page(ctx: &LayoutContext<'_>, route: &str, page: Option<&Page>) -> Markup {
    let common = ctx.t("common");
    let mut meta = PageMeta::site(&common, format!("/page/{}", route));

    if let Some(page) = page {
        let content = &page.page_content;
        meta.title = format!(
            "{} {} {}",
            common.t("meta-common-page-title-prefix"),
            content.title,
            common.t("meta-common-page-title-suffix")
        );
        meta.keywords = content.keywords.iter().map(|k| k.keyword.clone()).collect();
    }

    let nodes = page.map(|p| p.page_content.content.as_slice()).unwrap_or(&[]);
    let body = html! {
        div.page_wrapper {
            (render_document(nodes, &ctx.render_options(PageContext::Page)))
        }
    };

    layout::page(ctx, &meta, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::models::{Keyword, PageContent};
    use crate::content::{ContentNode, InlineElement};
    use crate::i18n::{Locale, Translator};

    fn translator() -> Translator {
        let mut translator = Translator::empty();
        translator
            .add_bundle(
                Locale::fallback(),
                "common",
                r#"{"meta-common-page-title-prefix": "dorf |", "meta-common-page-title-suffix": "| 2024"}"#,
            )
            .unwrap();
        translator
    }

    fn context(translator: &Translator) -> LayoutContext<'_> {
        LayoutContext {
            locale: Locale::fallback(),
            translator,
            site_base_url: "https://example.org",
            contact_email: None,
            socials: &[],
            legal: None,
            consent: None,
        }
    }

    #[test]
    fn test_page_title_and_content() {
        let translator = translator();
        let page_data = Page {
            locale: "de".to_string(),
            page_content: PageContent {
                title: "Impressum".to_string(),
                route: "imprint".to_string(),
                content: vec![ContentNode::Paragraph {
                    children: vec![InlineElement::text("Kontakt")],
                }],
                keywords: vec![Keyword {
                    keyword: "impressum".to_string(),
                }],
            },
            ..Default::default()
        };

        let html = page(&context(&translator), "imprint", Some(&page_data)).into_string();

        assert!(html.contains("<title>dorf | Impressum | 2024</title>"));
        assert!(html.contains(r#"<meta name="keywords" content="impressum">"#));
        assert!(html.contains("<p><span>Kontakt</span></p>"));
        assert!(html.contains(r#"href="https://example.org/en/page/imprint""#));
    }

    #[test]
    fn test_missing_page_renders_empty_content() {
        let translator = translator();
        let html = page(&context(&translator), "nowhere", None).into_string();
        assert!(html.contains(r#"<div class="page_wrapper"><div class="content"></div></div>"#));
    }
}
