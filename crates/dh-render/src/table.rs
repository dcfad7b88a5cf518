//! Table rendering.

use dh_gdocs::types::{ParagraphElement, StructuralElement, Table, TableCell};

use crate::style::{apply_inline_style, escape_html};

/// Background of cells without a color.
const DEFAULT_BACKGROUND: &str = "rgb(255, 255, 255)";

/// Render a table as HTML.
///
/// Each cell shows the first run of its first paragraph only.
#[must_use]
pub fn render_table(table: &Table) -> String {
    let mut html = String::from(r#"<br><table class="table" style="width: 100%">"#);
    for row in &table.table_rows {
        html.push_str("<tr>");
        for cell in &row.table_cells {
            html.push_str("<td style='background-color: ");
            html.push_str(&cell_background(cell));
            html.push_str("'>");
            html.push_str(&cell_text(cell));
            html.push_str("</td>");
        }
        html.push_str("</tr>");
    }
    html.push_str("</table>");
    html
}

/// Linear 0-255 scaling of the background color, unrounded.
fn cell_background(cell: &TableCell) -> String {
    match cell.background_rgb() {
        Some(rgb) => format!(
            "rgb({}, {}, {})",
            rgb.red * 255.0,
            rgb.green * 255.0,
            rgb.blue * 255.0
        ),
        None => DEFAULT_BACKGROUND.to_owned(),
    }
}

fn cell_text(cell: &TableCell) -> String {
    let run = cell
        .content
        .first()
        .and_then(StructuralElement::as_paragraph)
        .and_then(|p| p.elements.first())
        .and_then(ParagraphElement::as_text_run);
    match run {
        Some(run) => apply_inline_style(&escape_html(run.text().trim()), run.style()),
        None => String::new(),
    }
}
