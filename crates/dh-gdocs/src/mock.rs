//! In-memory document source and tree builder for testing.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::DocsError;
use crate::source::DocumentSource;
use crate::types::{
    Alignment, Body, Bullet, Color, Dimension, Document, EmbeddedObject, ImageProperties,
    InlineObject, InlineObjectElement, InlineObjectProperties, OptionalColor, Paragraph,
    ParagraphElement, ParagraphStyle, RgbColor, Size, StructuralElement, Table, TableCell,
    TableCellStyle, TableRow, TextRun, TextStyle,
};

/// Mock document source for testing.
///
/// # Example
///
/// ```ignore
/// use dh_gdocs::mock::{DocumentBuilder, MockDocs};
///
/// let docs = MockDocs::new()
///     .with_document(DocumentBuilder::new("doc-1").heading("Users").build())
///     .with_failure("doc-2", 403, "The caller does not have permission");
/// ```
#[derive(Debug, Default)]
pub struct MockDocs {
    documents: RwLock<HashMap<String, Document>>,
    images: RwLock<HashMap<String, Vec<u8>>>,
    failures: RwLock<HashMap<String, (u16, String)>>,
    document_calls: AtomicUsize,
    image_calls: AtomicUsize,
}

impl MockDocs {
    /// Create an empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve a document under its own ID.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_document(self, document: Document) -> Self {
        self.documents
            .write()
            .unwrap()
            .insert(document.document_id.clone(), document);
        self
    }

    /// Serve image bytes for a content URI.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_image(self, uri: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.images.write().unwrap().insert(uri.into(), bytes.into());
        self
    }

    /// Fail every fetch of a document ID or image URI with an HTTP error.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_failure(
        self,
        key: impl Into<String>,
        status: u16,
        body: impl Into<String>,
    ) -> Self {
        self.failures
            .write()
            .unwrap()
            .insert(key.into(), (status, body.into()));
        self
    }

    /// Number of `fetch_document` calls so far.
    #[must_use]
    pub fn document_calls(&self) -> usize {
        self.document_calls.load(Ordering::SeqCst)
    }

    /// Number of `fetch_image` calls so far.
    #[must_use]
    pub fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }

    fn failure(&self, key: &str) -> Option<DocsError> {
        self.failures
            .read()
            .unwrap()
            .get(key)
            .map(|(status, body)| DocsError::HttpResponse {
                status: *status,
                body: body.clone(),
            })
    }
}

impl DocumentSource for MockDocs {
    fn fetch_document(&self, document_id: &str) -> Result<Document, DocsError> {
        self.document_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failure(document_id) {
            return Err(err);
        }
        self.documents
            .read()
            .unwrap()
            .get(document_id)
            .cloned()
            .ok_or_else(|| DocsError::NotFound(document_id.to_owned()))
    }

    fn fetch_image(&self, content_uri: &str) -> Result<Vec<u8>, DocsError> {
        self.image_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.failure(content_uri) {
            return Err(err);
        }
        self.images
            .read()
            .unwrap()
            .get(content_uri)
            .cloned()
            .ok_or_else(|| DocsError::NotFound(content_uri.to_owned()))
    }
}

/// Plain text run.
#[must_use]
pub fn run(text: &str) -> TextRun {
    TextRun {
        content: Some(text.to_owned()),
        ..TextRun::default()
    }
}

/// Text run with a character style.
#[must_use]
pub fn styled_run(text: &str, style: TextStyle) -> TextRun {
    TextRun {
        text_style: Some(style),
        ..run(text)
    }
}

/// Text run that is a pending suggested insertion.
#[must_use]
pub fn suggestion(text: &str) -> TextRun {
    TextRun {
        suggested_insertion_ids: vec!["suggest.1".to_owned()],
        ..run(text)
    }
}

/// Paragraph of text runs with the given named style.
#[must_use]
pub fn paragraph(named_style: &str, runs: Vec<TextRun>) -> Paragraph {
    Paragraph {
        elements: runs.into_iter().map(ParagraphElement::TextRun).collect(),
        paragraph_style: Some(ParagraphStyle {
            named_style_type: Some(named_style.to_owned()),
            alignment: None,
        }),
        bullet: None,
    }
}

/// Builder for document trees.
#[derive(Debug, Clone)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    /// Start an empty document.
    #[must_use]
    pub fn new(document_id: &str) -> Self {
        Self {
            document: Document {
                document_id: document_id.to_owned(),
                title: None,
                body: Body::default(),
                inline_objects: BTreeMap::new(),
            },
        }
    }

    /// Append any structural element.
    #[must_use]
    pub fn element(mut self, element: StructuralElement) -> Self {
        self.document.body.content.push(element);
        self
    }

    /// Append a paragraph.
    #[must_use]
    pub fn paragraph_element(self, paragraph: Paragraph) -> Self {
        self.element(StructuralElement::Paragraph(paragraph))
    }

    /// `HEADING_2` paragraph without route annotation.
    #[must_use]
    pub fn heading(self, text: &str) -> Self {
        self.paragraph_element(paragraph("HEADING_2", vec![run(&format!("{text}\n"))]))
    }

    /// `HEADING_2` paragraph followed by a suggested `[routes]` annotation.
    #[must_use]
    pub fn heading_with_routes(self, text: &str, routes: &str) -> Self {
        self.paragraph_element(paragraph(
            "HEADING_2",
            vec![run(text), suggestion(&format!("[{routes}]")), run("\n")],
        ))
    }

    /// Plain `NORMAL_TEXT` paragraph.
    #[must_use]
    pub fn text(self, text: &str) -> Self {
        self.runs(vec![run(&format!("{text}\n"))])
    }

    /// `NORMAL_TEXT` paragraph made of the given runs.
    #[must_use]
    pub fn runs(self, runs: Vec<TextRun>) -> Self {
        self.paragraph_element(paragraph("NORMAL_TEXT", runs))
    }

    /// `NORMAL_TEXT` paragraph with an alignment.
    #[must_use]
    pub fn aligned(self, text: &str, alignment: Alignment) -> Self {
        let mut p = paragraph("NORMAL_TEXT", vec![run(&format!("{text}\n"))]);
        if let Some(style) = p.paragraph_style.as_mut() {
            style.alignment = Some(alignment);
        }
        self.paragraph_element(p)
    }

    /// List item paragraph.
    #[must_use]
    pub fn bullet(self, list_id: &str, runs: Vec<TextRun>) -> Self {
        let mut p = paragraph("NORMAL_TEXT", runs);
        p.bullet = Some(Bullet {
            list_id: Some(list_id.to_owned()),
        });
        self.paragraph_element(p)
    }

    /// Table of single-paragraph cells with optional background colors.
    #[must_use]
    pub fn table(self, rows: Vec<Vec<(&str, Option<RgbColor>)>>) -> Self {
        let table_rows = rows
            .into_iter()
            .map(|cells| TableRow {
                table_cells: cells
                    .into_iter()
                    .map(|(text, rgb)| TableCell {
                        content: vec![StructuralElement::Paragraph(paragraph(
                            "NORMAL_TEXT",
                            vec![run(&format!("{text}\n"))],
                        ))],
                        table_cell_style: rgb.map(|rgb| TableCellStyle {
                            background_color: Some(OptionalColor {
                                color: Some(Color {
                                    rgb_color: Some(rgb),
                                }),
                            }),
                        }),
                    })
                    .collect(),
            })
            .collect();
        self.element(StructuralElement::Table(Table { table_rows }))
    }

    /// Register an image object and reference it from its own paragraph.
    #[must_use]
    pub fn image(self, object_id: &str, uri: &str, width: f64, height: f64) -> Self {
        self.image_aligned(object_id, uri, width, height, None)
    }

    /// Like [`image`](Self::image), with a paragraph alignment.
    #[must_use]
    pub fn image_aligned(
        mut self,
        object_id: &str,
        uri: &str,
        width: f64,
        height: f64,
        alignment: Option<Alignment>,
    ) -> Self {
        let dimension = |magnitude| Dimension {
            magnitude: Some(magnitude),
            unit: Some("PT".to_owned()),
        };
        self.document.inline_objects.insert(
            object_id.to_owned(),
            InlineObject {
                inline_object_properties: Some(InlineObjectProperties {
                    embedded_object: Some(EmbeddedObject {
                        image_properties: Some(ImageProperties {
                            content_uri: Some(uri.to_owned()),
                        }),
                        size: Some(Size {
                            width: Some(dimension(width)),
                            height: Some(dimension(height)),
                        }),
                    }),
                }),
            },
        );
        let p = Paragraph {
            elements: vec![
                ParagraphElement::InlineObject(InlineObjectElement {
                    inline_object_id: Some(object_id.to_owned()),
                }),
                ParagraphElement::TextRun(run("\n")),
            ],
            paragraph_style: Some(ParagraphStyle {
                named_style_type: Some("NORMAL_TEXT".to_owned()),
                alignment,
            }),
            bullet: None,
        };
        self.paragraph_element(p)
    }

    /// Finish the document.
    ///
    /// As in API responses, the body ends with an empty paragraph.
    #[must_use]
    pub fn build(self) -> Document {
        self.text("").document
    }
}
