//! Document and structural element types.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::inline_object::InlineObject;
use super::paragraph::Paragraph;
use super::table::Table;

/// A fetched document.
///
/// Only includes fields that are actually used.
/// Serde ignores unknown fields from the API response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Document ID.
    pub document_id: String,
    /// Document title.
    #[serde(default)]
    pub title: Option<String>,
    /// Main body.
    #[serde(default)]
    pub body: Body,
    /// Embedded objects referenced from paragraphs, keyed by object ID.
    #[serde(default)]
    pub inline_objects: BTreeMap<String, InlineObject>,
}

/// Document body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Body {
    /// Structural elements in document order.
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

/// One block-level node of the document tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawStructuralElement")]
pub enum StructuralElement {
    /// Text paragraph (including headings and list items).
    Paragraph(Paragraph),
    /// Table.
    Table(Table),
    /// Section breaks, tables of contents and anything else.
    Other,
}

impl StructuralElement {
    /// The paragraph, if this element is one.
    #[must_use]
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Self::Paragraph(p) => Some(p),
            _ => None,
        }
    }
}

/// Wire shape of a structural element.
#[derive(Deserialize)]
struct RawStructuralElement {
    #[serde(default)]
    paragraph: Option<Paragraph>,
    #[serde(default)]
    table: Option<Table>,
}

impl From<RawStructuralElement> for StructuralElement {
    fn from(raw: RawStructuralElement) -> Self {
        match (raw.paragraph, raw.table) {
            (Some(paragraph), _) => Self::Paragraph(paragraph),
            (None, Some(table)) => Self::Table(table),
            (None, None) => Self::Other,
        }
    }
}
