//! Rich-text document model as delivered by the content API.
//!
//! Every field is optional on the wire and any field with the wrong JSON type
//! is treated as absent. A node or inline element that cannot be read at all
//! still deserializes (as `ContentNode::Unknown` or an empty element), so a
//! document array always keeps its length.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Deserialize an optional field, turning type mismatches into `None`.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

/// Deserialize an array field element by element; non-arrays become empty and
/// unreadable elements are skipped.
pub(crate) fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

// ============================================================================
// Block-level nodes
// ============================================================================

/// One block of a rich-text document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum ContentNode {
    Paragraph {
        children: Vec<InlineElement>,
    },
    Heading {
        level: Option<u8>,
        children: Vec<InlineElement>,
    },
    Image {
        image: Option<ImageAsset>,
    },
    List {
        format: ListFormat,
        items: Vec<InlineElement>,
    },
    Link {
        url: Option<String>,
        children: Vec<InlineElement>,
    },
    Quote {
        children: Vec<InlineElement>,
    },
    Code {
        children: Vec<InlineElement>,
    },
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListFormat {
    Unordered,
    Ordered,
    Other,
}

#[derive(Debug, Default, Deserialize)]
struct RawContentNode {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    children: Option<Vec<InlineElement>>,
    #[serde(default, deserialize_with = "lenient")]
    level: Option<u8>,
    #[serde(default, deserialize_with = "lenient")]
    format: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    image: Option<ImageAsset>,
    #[serde(default, deserialize_with = "lenient")]
    url: Option<String>,
}

impl From<RawContentNode> for ContentNode {
    fn from(raw: RawContentNode) -> Self {
        let children = raw.children.unwrap_or_default();

        match raw.kind.as_deref() {
            Some("paragraph") => ContentNode::Paragraph { children },
            Some("heading") => ContentNode::Heading {
                level: raw.level,
                children,
            },
            Some("image") => ContentNode::Image { image: raw.image },
            Some("list") => ContentNode::List {
                format: match raw.format.as_deref() {
                    Some("unordered") => ListFormat::Unordered,
                    Some("ordered") => ListFormat::Ordered,
                    _ => ListFormat::Other,
                },
                items: children,
            },
            Some("link") => ContentNode::Link {
                url: raw.url,
                children,
            },
            Some("quote") => ContentNode::Quote { children },
            Some("code") => ContentNode::Code { children },
            _ => ContentNode::Unknown,
        }
    }
}

impl From<Value> for ContentNode {
    fn from(value: Value) -> Self {
        RawContentNode::deserialize(value)
            .map(ContentNode::from)
            .unwrap_or(ContentNode::Unknown)
    }
}

impl ContentNode {
    /// Text of the first inline element, descending into the first child's
    /// children when that child is a composite.
    pub fn first_text(&self) -> &str {
        let children = match self {
            ContentNode::Paragraph { children }
            | ContentNode::Heading { children, .. }
            | ContentNode::Link { children, .. }
            | ContentNode::Quote { children }
            | ContentNode::Code { children } => children.as_slice(),
            ContentNode::List { items, .. } => items.as_slice(),
            ContentNode::Image { .. } | ContentNode::Unknown => &[],
        };

        match children.first() {
            Some(first) => match (&first.text, &first.children) {
                (Some(text), _) => text.as_str(),
                (None, Some(nested)) => nested
                    .first()
                    .and_then(|n| n.text.as_deref())
                    .unwrap_or(""),
                (None, None) => "",
            },
            None => "",
        }
    }
}

// ============================================================================
// Inline elements
// ============================================================================

/// Boolean text marks. Only the highest-precedence mark is ever rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Marks {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub strikethrough: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InlineKind {
    #[default]
    Text,
    Link {
        url: String,
    },
}

/// The single wrapper an inline leaf renders with, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Link,
    Text,
    Break,
}

/// A span-level unit: a styled text leaf, a link, or a composite with
/// nested children.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "Value")]
pub struct InlineElement {
    pub kind: InlineKind,
    pub text: Option<String>,
    pub marks: Marks,
    pub children: Option<Vec<InlineElement>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawInlineElement {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    bold: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    italic: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    underline: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    strikethrough: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    children: Option<Vec<InlineElement>>,
}

impl From<Value> for InlineElement {
    fn from(value: Value) -> Self {
        let raw = RawInlineElement::deserialize(value).unwrap_or_default();

        InlineElement {
            kind: match raw.kind.as_deref() {
                Some("link") => InlineKind::Link {
                    url: raw.url.unwrap_or_default(),
                },
                _ => InlineKind::Text,
            },
            text: raw.text,
            marks: Marks {
                bold: raw.bold.unwrap_or(false),
                italic: raw.italic.unwrap_or(false),
                underline: raw.underline.unwrap_or(false),
                strikethrough: raw.strikethrough.unwrap_or(false),
            },
            children: raw.children,
        }
    }
}

impl InlineElement {
    /// Plain text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Link element with the given URL and label children.
    pub fn link(url: impl Into<String>, children: Vec<InlineElement>) -> Self {
        Self {
            kind: InlineKind::Link { url: url.into() },
            children: Some(children),
            ..Self::default()
        }
    }

    pub fn with_marks(mut self, marks: Marks) -> Self {
        self.marks = marks;
        self
    }

    /// Pick the wrapper for this element as a leaf:
    /// bold > italic > underline > strikethrough > link > text/break.
    pub fn style(&self) -> InlineStyle {
        let Marks {
            bold,
            italic,
            underline,
            strikethrough,
        } = self.marks;

        if bold {
            InlineStyle::Bold
        } else if italic {
            InlineStyle::Italic
        } else if underline {
            InlineStyle::Underline
        } else if strikethrough {
            InlineStyle::Strikethrough
        } else if matches!(self.kind, InlineKind::Link { .. }) {
            InlineStyle::Link
        } else if self.text.as_deref().is_some_and(|t| !t.is_empty()) {
            InlineStyle::Text
        } else {
            InlineStyle::Break
        }
    }

    /// Own text, empty when absent.
    pub fn text_or_empty(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Label of a link: the text of its first child.
    pub fn link_label(&self) -> &str {
        self.children
            .as_ref()
            .and_then(|c| c.first())
            .map(InlineElement::text_or_empty)
            .unwrap_or("")
    }
}

// ============================================================================
// Media
// ============================================================================

/// An uploaded image with its optional responsive variants.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAsset {
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub alternative_text: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub caption: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub width: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub height: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub formats: Option<ImageFormats>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImageFormats {
    #[serde(default, deserialize_with = "lenient")]
    pub thumbnail: Option<ImageFormat>,
    #[serde(default, deserialize_with = "lenient")]
    pub small: Option<ImageFormat>,
    #[serde(default, deserialize_with = "lenient")]
    pub medium: Option<ImageFormat>,
    #[serde(default, deserialize_with = "lenient")]
    pub large: Option<ImageFormat>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ImageFormat {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub width: Option<u32>,
    #[serde(default, deserialize_with = "lenient")]
    pub height: Option<u32>,
}

impl ImageAsset {
    /// URL of the named variant, falling back to the original upload.
    pub fn variant_url(&self, pick: fn(&ImageFormats) -> Option<&ImageFormat>) -> &str {
        self.formats
            .as_ref()
            .and_then(pick)
            .and_then(|f| f.url.as_deref())
            .or(self.url.as_deref())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: Value) -> ContentNode {
        serde_json::from_value(value).expect("Content nodes always deserialize")
    }

    fn inline(value: Value) -> InlineElement {
        serde_json::from_value(value).expect("Inline elements always deserialize")
    }

    // ==================== Node Kind Tests ====================

    #[test]
    fn test_heading_with_level() {
        let parsed = node(json!({"type": "heading", "level": 2, "children": [{"text": "Hi"}]}));
        assert_eq!(
            parsed,
            ContentNode::Heading {
                level: Some(2),
                children: vec![InlineElement::text("Hi")],
            }
        );
    }

    #[test]
    fn test_heading_with_malformed_level() {
        let parsed = node(json!({"type": "heading", "level": "two", "children": []}));
        assert!(matches!(parsed, ContentNode::Heading { level: None, .. }));
    }

    #[test]
    fn test_list_formats() {
        let ordered = node(json!({"type": "list", "format": "ordered", "children": []}));
        let other = node(json!({"type": "list", "format": "checklist"}));
        let missing = node(json!({"type": "list"}));

        assert!(matches!(ordered, ContentNode::List { format: ListFormat::Ordered, .. }));
        assert!(matches!(other, ContentNode::List { format: ListFormat::Other, .. }));
        assert!(matches!(missing, ContentNode::List { format: ListFormat::Other, .. }));
    }

    #[test]
    fn test_unknown_and_malformed_nodes() {
        assert_eq!(node(json!({"type": "table"})), ContentNode::Unknown);
        assert_eq!(node(json!({"children": []})), ContentNode::Unknown);
        assert_eq!(node(json!("paragraph")), ContentNode::Unknown);
        assert_eq!(node(json!(null)), ContentNode::Unknown);
    }

    #[test]
    fn test_document_keeps_length() {
        let doc: Vec<ContentNode> = serde_json::from_value(json!([
            {"type": "paragraph", "children": [{"text": "a"}]},
            42,
            {"type": "mystery"},
            {"type": "quote", "children": "oops"}
        ]))
        .expect("Document should deserialize");

        assert_eq!(doc.len(), 4);
        assert_eq!(doc[1], ContentNode::Unknown);
        assert_eq!(doc[3], ContentNode::Quote { children: vec![] });
    }

    #[test]
    fn test_image_node() {
        let parsed = node(json!({
            "type": "image",
            "image": {"url": "/a.png", "alternativeText": "alt", "caption": "en:\"Hi\"", "width": "wide"}
        }));

        let ContentNode::Image { image: Some(image) } = parsed else {
            panic!("Expected image node");
        };
        assert_eq!(image.url.as_deref(), Some("/a.png"));
        assert_eq!(image.alternative_text.as_deref(), Some("alt"));
        assert_eq!(image.caption.as_deref(), Some("en:\"Hi\""));
        assert_eq!(image.width, None);
    }

    // ==================== Inline Element Tests ====================

    #[test]
    fn test_inline_marks() {
        let parsed = inline(json!({"type": "text", "text": "x", "bold": true, "italic": true}));
        assert!(parsed.marks.bold);
        assert!(parsed.marks.italic);
        assert!(!parsed.marks.underline);
        assert_eq!(parsed.style(), InlineStyle::Bold);
    }

    #[test]
    fn test_inline_mark_wrong_type_ignored() {
        let parsed = inline(json!({"text": "x", "bold": "yes"}));
        assert_eq!(parsed.style(), InlineStyle::Text);
    }

    #[test]
    fn test_inline_link() {
        let parsed = inline(json!({
            "type": "link",
            "url": "https://example.org",
            "children": [{"type": "text", "text": "Example"}]
        }));

        assert_eq!(
            parsed.kind,
            InlineKind::Link {
                url: "https://example.org".to_string()
            }
        );
        assert_eq!(parsed.style(), InlineStyle::Link);
        assert_eq!(parsed.link_label(), "Example");
    }

    #[test]
    fn test_inline_link_without_url() {
        let parsed = inline(json!({"type": "link"}));
        assert_eq!(parsed.kind, InlineKind::Link { url: String::new() });
        assert_eq!(parsed.link_label(), "");
    }

    #[test]
    fn test_style_precedence_chain() {
        let marks = |bold, italic, underline, strikethrough| Marks {
            bold,
            italic,
            underline,
            strikethrough,
        };
        let el = |m| InlineElement::text("x").with_marks(m);

        assert_eq!(el(marks(false, true, true, true)).style(), InlineStyle::Italic);
        assert_eq!(el(marks(false, false, true, true)).style(), InlineStyle::Underline);
        assert_eq!(el(marks(false, false, false, true)).style(), InlineStyle::Strikethrough);
        assert_eq!(
            InlineElement::link("u", vec![]).with_marks(marks(false, false, false, true)).style(),
            InlineStyle::Strikethrough
        );
    }

    #[test]
    fn test_empty_or_absent_text_is_break() {
        assert_eq!(InlineElement::text("").style(), InlineStyle::Break);
        assert_eq!(InlineElement::default().style(), InlineStyle::Break);
        assert_eq!(InlineElement::text(" ").style(), InlineStyle::Text);
    }

    #[test]
    fn test_non_object_inline_is_empty() {
        assert_eq!(inline(json!(7)), InlineElement::default());
    }

    // ==================== first_text Tests ====================

    #[test]
    fn test_first_text_plain() {
        let parsed = node(json!({"type": "code", "children": [{"text": "let x = 1;"}, {"text": "ignored"}]}));
        assert_eq!(parsed.first_text(), "let x = 1;");
    }

    #[test]
    fn test_first_text_composite() {
        let parsed = node(json!({"type": "code", "children": [{"children": [{"text": "nested"}]}]}));
        assert_eq!(parsed.first_text(), "nested");
    }

    #[test]
    fn test_first_text_missing() {
        assert_eq!(node(json!({"type": "code"})).first_text(), "");
        assert_eq!(ContentNode::Unknown.first_text(), "");
    }

    // ==================== Image Variant Tests ====================

    #[test]
    fn test_variant_url_falls_back_to_original() {
        let image: ImageAsset = serde_json::from_value(json!({
            "url": "/orig.jpg",
            "formats": {"medium": {"url": "/medium.jpg"}}
        }))
        .unwrap();

        assert_eq!(image.variant_url(|f| f.medium.as_ref()), "/medium.jpg");
        assert_eq!(image.variant_url(|f| f.large.as_ref()), "/orig.jpg");
        assert_eq!(ImageAsset::default().variant_url(|f| f.small.as_ref()), "");
    }
}
