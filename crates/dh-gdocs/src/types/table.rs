//! Table types.

use serde::Deserialize;

use super::document::StructuralElement;

/// A table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Rows in order.
    #[serde(default)]
    pub table_rows: Vec<TableRow>,
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// Cells in order.
    #[serde(default)]
    pub table_cells: Vec<TableCell>,
}

/// A table cell; its content is a nested element sequence.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    #[serde(default)]
    pub content: Vec<StructuralElement>,
    #[serde(default)]
    pub table_cell_style: Option<TableCellStyle>,
}

impl TableCell {
    /// Background color, if one is set.
    #[must_use]
    pub fn background_rgb(&self) -> Option<&RgbColor> {
        self.table_cell_style
            .as_ref()
            .and_then(|s| s.background_color.as_ref())
            .and_then(|c| c.color.as_ref())
            .and_then(|c| c.rgb_color.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellStyle {
    #[serde(default)]
    pub background_color: Option<OptionalColor>,
}

/// A color that may be explicitly transparent (no `color`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OptionalColor {
    #[serde(default)]
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    #[serde(default)]
    pub rgb_color: Option<RgbColor>,
}

/// RGB color with channels in `0.0..=1.0`.
///
/// The API omits channels that are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct RgbColor {
    #[serde(default)]
    pub red: f64,
    #[serde(default)]
    pub green: f64,
    #[serde(default)]
    pub blue: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_rgb_with_omitted_channels() {
        let cell: TableCell = serde_json::from_str(
            r#"{
                "content": [],
                "tableCellStyle": {"backgroundColor": {"color": {"rgbColor": {"red": 0.5, "blue": 1}}}}
            }"#,
        )
        .unwrap();
        assert_eq!(
            cell.background_rgb(),
            Some(&RgbColor {
                red: 0.5,
                green: 0.0,
                blue: 1.0
            })
        );
    }

    #[test]
    fn test_background_rgb_absent() {
        let cell: TableCell =
            serde_json::from_str(r#"{"tableCellStyle": {"backgroundColor": {}}}"#).unwrap();
        assert_eq!(cell.background_rgb(), None);
        assert_eq!(TableCell::default().background_rgb(), None);
    }
}
