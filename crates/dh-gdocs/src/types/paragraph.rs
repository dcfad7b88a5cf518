//! Paragraph and inline run types.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Style prefix shared by every heading level (`HEADING_1` .. `HEADING_6`).
const HEADING_STYLE_PREFIX: &str = "HEADING_";

/// Style used when a run carries no `textStyle`.
static NO_STYLE: TextStyle = TextStyle {
    bold: None,
    italic: None,
    underline: None,
    strikethrough: None,
    link: None,
};

/// A paragraph: ordered inline elements plus paragraph-level style.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paragraph {
    /// Inline elements in order.
    #[serde(default)]
    pub elements: Vec<ParagraphElement>,
    /// Named style and alignment.
    #[serde(default)]
    pub paragraph_style: Option<ParagraphStyle>,
    /// List membership, present for bulleted/numbered items.
    #[serde(default)]
    pub bullet: Option<Bullet>,
}

impl Paragraph {
    /// Whether the paragraph uses one of the `HEADING_*` named styles.
    #[must_use]
    pub fn is_heading_style(&self) -> bool {
        self.paragraph_style
            .as_ref()
            .and_then(|s| s.named_style_type.as_deref())
            .is_some_and(|name| name.starts_with(HEADING_STYLE_PREFIX))
    }

    /// Paragraph alignment, if set.
    #[must_use]
    pub fn alignment(&self) -> Option<Alignment> {
        self.paragraph_style.as_ref().and_then(|s| s.alignment)
    }

    /// ID of the list this paragraph belongs to, if any.
    #[must_use]
    pub fn list_id(&self) -> Option<&str> {
        self.bullet.as_ref().and_then(|b| b.list_id.as_deref())
    }
}

/// Paragraph-level style.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    /// Named style (e.g. `NORMAL_TEXT`, `HEADING_2`).
    #[serde(default)]
    pub named_style_type: Option<String>,
    /// Horizontal alignment.
    #[serde(default)]
    pub alignment: Option<Alignment>,
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Alignment {
    /// Aligned to the start of the line.
    Start,
    /// Centered.
    Center,
    /// Aligned to the end of the line.
    End,
    /// Justified.
    Justified,
    /// Unspecified or unknown alignment.
    #[serde(other)]
    Unspecified,
}

/// List membership of a paragraph.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bullet {
    /// List ID shared by all items of one list.
    #[serde(default)]
    pub list_id: Option<String>,
}

/// One inline element of a paragraph.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawParagraphElement")]
pub enum ParagraphElement {
    /// Styled text.
    TextRun(TextRun),
    /// Reference to an embedded object (image).
    InlineObject(InlineObjectElement),
    /// Page breaks, rules, footnote references and the like.
    Other,
}

impl ParagraphElement {
    /// The text run, if this element is one.
    #[must_use]
    pub fn as_text_run(&self) -> Option<&TextRun> {
        match self {
            Self::TextRun(run) => Some(run),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawParagraphElement {
    #[serde(default)]
    text_run: Option<TextRun>,
    #[serde(default)]
    inline_object_element: Option<InlineObjectElement>,
}

impl From<RawParagraphElement> for ParagraphElement {
    fn from(raw: RawParagraphElement) -> Self {
        match (raw.text_run, raw.inline_object_element) {
            (Some(run), _) => Self::TextRun(run),
            (None, Some(object)) => Self::InlineObject(object),
            (None, None) => Self::Other,
        }
    }
}

/// A run of text sharing one style.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    /// Raw text, usually ending with `\n` on the last run of a paragraph.
    #[serde(default)]
    pub content: Option<String>,
    /// Character style.
    #[serde(default)]
    pub text_style: Option<TextStyle>,
    /// Pending suggested insertions covering this run.
    #[serde(default)]
    pub suggested_insertion_ids: Vec<String>,
    /// Pending suggested deletions covering this run.
    #[serde(default)]
    pub suggested_deletion_ids: Vec<String>,
    /// Pending suggested style changes, keyed by suggestion ID.
    #[serde(default)]
    pub suggested_text_style_changes: BTreeMap<String, serde_json::Value>,
}

impl TextRun {
    /// Raw content, or empty.
    #[must_use]
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }

    /// Character style, defaulting to no styling.
    #[must_use]
    pub fn style(&self) -> &TextStyle {
        self.text_style.as_ref().unwrap_or(&NO_STYLE)
    }

    /// Whether the run is a suggested insertion.
    #[must_use]
    pub fn is_suggested_insertion(&self) -> bool {
        !self.suggested_insertion_ids.is_empty()
    }

    /// Whether the run carries any unresolved review suggestion.
    #[must_use]
    pub fn has_pending_suggestion(&self) -> bool {
        self.is_suggested_insertion()
            || !self.suggested_deletion_ids.is_empty()
            || !self.suggested_text_style_changes.is_empty()
    }
}

/// Character style of a run.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TextStyle {
    #[serde(default)]
    pub bold: Option<bool>,
    #[serde(default)]
    pub italic: Option<bool>,
    #[serde(default)]
    pub underline: Option<bool>,
    #[serde(default)]
    pub strikethrough: Option<bool>,
    /// Hyperlink target.
    #[serde(default)]
    pub link: Option<Link>,
}

impl TextStyle {
    #[must_use]
    pub fn is_bold(&self) -> bool {
        self.bold == Some(true)
    }

    #[must_use]
    pub fn is_italic(&self) -> bool {
        self.italic == Some(true)
    }

    #[must_use]
    pub fn is_underline(&self) -> bool {
        self.underline == Some(true)
    }

    #[must_use]
    pub fn is_strikethrough(&self) -> bool {
        self.strikethrough == Some(true)
    }

    /// Link URL, if the run is a hyperlink.
    #[must_use]
    pub fn link_url(&self) -> Option<&str> {
        self.link.as_ref().and_then(|l| l.url.as_deref())
    }
}

/// Hyperlink.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Link {
    /// External URL. Links to headings or bookmarks have no URL.
    #[serde(default)]
    pub url: Option<String>,
}

/// Inline reference to an entry of [`Document::inline_objects`](super::Document).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineObjectElement {
    /// Referenced object ID.
    #[serde(default)]
    pub inline_object_id: Option<String>,
}
