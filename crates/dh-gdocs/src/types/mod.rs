//! Document API types.
//!
//! The API returns a loosely-typed JSON tree where every node is an object
//! with one populated member (`paragraph`, `table`, `textRun`, ...). These
//! types turn that shape into tagged variants at deserialization time, so
//! consumers match on node kinds instead of probing optional fields.

mod document;
mod inline_object;
mod paragraph;
mod table;

pub use document::{Body, Document, StructuralElement};
pub use inline_object::{
    Dimension, EmbeddedObject, ImageProperties, InlineObject, InlineObjectProperties, Size,
};
pub use paragraph::{
    Alignment, Bullet, InlineObjectElement, Link, Paragraph, ParagraphElement, ParagraphStyle,
    TextRun, TextStyle,
};
pub use table::{Color, OptionalColor, RgbColor, Table, TableCell, TableCellStyle, TableRow};
