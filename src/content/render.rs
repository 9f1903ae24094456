//! Rich-text renderer: one `Markup` per document node.
//!
//! Nothing in here can fail. Missing or malformed content degrades to empty
//! strings, `<br>` placeholders or empty markup.

use crate::content::caption;
use crate::content::model::{ContentNode, InlineElement, InlineKind, InlineStyle, ListFormat};
use crate::i18n::{Locale, Translator};
use maud::{html, Markup};
use std::fmt;

/// Where a document is shown. Used as the CSS class prefix for images.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageContext {
    Page,
    Blog,
}

impl PageContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageContext::Page => "page",
            PageContext::Blog => "blog",
        }
    }
}

impl fmt::Display for PageContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Labels for the copy-to-clipboard control on code blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTranslation {
    pub copy_prompt: String,
    pub copy_success: String,
}

impl CodeTranslation {
    pub fn from_translator(translator: &Translator, locale: Locale) -> Self {
        let t = translator.namespace(locale, "common");
        Self {
            copy_prompt: t.t("copy2clipboard"),
            copy_success: t.t("copy2clipboard-success"),
        }
    }
}

/// Everything the renderer needs besides the nodes themselves.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub context: PageContext,
    pub locale: Locale,
    pub code: CodeTranslation,
}

/// Render every node, preserving order. The result always has exactly one
/// entry per input node; callers key on position.
pub fn render_content(nodes: &[ContentNode], options: &RenderOptions) -> Vec<Markup> {
    nodes
        .iter()
        .enumerate()
        .map(|(index, node)| render_node(node, index, options))
        .collect()
}

/// Render a whole document inside a wrapper `div`.
pub fn render_document(nodes: &[ContentNode], options: &RenderOptions) -> Markup {
    html! {
        div.content {
            @for node in render_content(nodes, options) {
                (node)
            }
        }
    }
}

fn render_node(node: &ContentNode, index: usize, options: &RenderOptions) -> Markup {
    match node {
        ContentNode::Paragraph { children } => html! {
            p {
                @for child in children {
                    (inline_leaf(child))
                }
            }
        },
        ContentNode::Heading { level, children } => heading(*level, children),
        ContentNode::Image { image } => {
            let image = image.clone().unwrap_or_default();
            let raw_caption = image.caption.as_deref().unwrap_or("");
            let caption = caption::select(raw_caption, options.locale);
            let context = options.context.as_str();

            html! {
                picture {
                    img class={ (context) "_image" }
                        src=(image.url.as_deref().unwrap_or(""))
                        alt=(image.alternative_text.as_deref().unwrap_or(""))
                        // Tooltip shows the translated text, not the packed caption.
                        title=(caption)
                        height="350"
                        width="350"
                        role="img"
                        loading="lazy";
                    @if !raw_caption.is_empty() {
                        figcaption class={ (context) "_caption" } {
                            "\"" (caption) "\""
                        }
                    }
                }
            }
        }
        ContentNode::List { format, items } => match format {
            ListFormat::Unordered => html! {
                ul {
                    @for item in items {
                        li { (inline_walk(nested(item))) }
                    }
                }
            },
            ListFormat::Ordered => html! {
                ol {
                    @for item in items {
                        li { (inline_walk(nested(item))) }
                    }
                }
            },
            ListFormat::Other => html! {},
        },
        ContentNode::Quote { children } => html! {
            blockquote { (inline_walk(children)) }
        },
        ContentNode::Code { .. } => code_block(node.first_text(), index, &options.code),
        ContentNode::Link { .. } | ContentNode::Unknown => html! {},
    }
}

fn heading(level: Option<u8>, children: &[InlineElement]) -> Markup {
    let inner = inline_walk(children);
    match level {
        Some(1) => html! { h1.h1 { (inner) } },
        Some(2) => html! { h2.h2 { (inner) } },
        Some(3) => html! { h3.h3 { (inner) } },
        Some(4) => html! { h4.h4 { (inner) } },
        Some(5) => html! { h5.h5 { (inner) } },
        Some(6) => html! { h6.h6 { (inner) } },
        _ => html! { div.h7 { (inner) } },
    }
}

fn code_block(code: &str, index: usize, translation: &CodeTranslation) -> Markup {
    let element_id = format!("code-{}", index);
    html! {
        div.code_block {
            pre id=(element_id) { code { (code) } }
            button.code_copy type="button"
                data-target=(element_id)
                data-success=(translation.copy_success) {
                (translation.copy_prompt)
            }
        }
    }
}

fn nested(element: &InlineElement) -> &[InlineElement] {
    element.children.as_deref().unwrap_or(&[])
}

/// Shared recursive walk: composites are flattened, leaves get exactly one
/// style wrapper, and an empty sequence becomes a single `<br>`.
fn inline_walk(elements: &[InlineElement]) -> Markup {
    if elements.is_empty() {
        return html! { br; };
    }

    html! {
        @for element in elements {
            @match &element.children {
                Some(children) => { (inline_walk(children)) },
                None => { (inline_leaf(element)) },
            }
        }
    }
}

fn inline_leaf(element: &InlineElement) -> Markup {
    let text = element.text_or_empty();

    match element.style() {
        InlineStyle::Bold => html! { b { (text) } },
        InlineStyle::Italic => html! { i { (text) } },
        InlineStyle::Underline => html! { u { (text) } },
        InlineStyle::Strikethrough => html! { s { (text) } },
        InlineStyle::Link => {
            let url = match &element.kind {
                InlineKind::Link { url } => url.as_str(),
                InlineKind::Text => "",
            };
            let label = element.link_label();
            html! {
                a href=(url) target="_blank" rel="noreferrer" title=(label) { (label) }
            }
        }
        InlineStyle::Text => html! { span { (text) } },
        InlineStyle::Break => html! { br; },
    }
}
