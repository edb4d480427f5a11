// src/report.rs

use crate::{
    error::{ReportError, Result},
    table::Table,
};
use std::path::Path;
use tracing::{debug, info, instrument};
use umya_spreadsheet::{Spreadsheet, Worksheet};

/// Header highlight.
pub const HEADER_FILL: &str = "FFFF00";
/// Fill for data rows at odd 1-based positions.
pub const ODD_ROW_FILL: &str = "FFFFFF";
/// Fill for data rows at even 1-based positions.
pub const EVEN_ROW_FILL: &str = "D3D3D3";
pub const COLUMN_WIDTH: f64 = 17.0;
pub const SHEET_NAME: &str = "Sheet1";

/// How a [`Table`] is laid out on the sheet. Colors are `RRGGBB` hex.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportStyle {
    pub sheet_name: String,
    pub header_fill: String,
    pub odd_row_fill: String,
    pub even_row_fill: String,
    pub column_width: f64,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            sheet_name: SHEET_NAME.to_string(),
            header_fill: HEADER_FILL.to_string(),
            odd_row_fill: ODD_ROW_FILL.to_string(),
            even_row_fill: EVEN_ROW_FILL.to_string(),
            column_width: COLUMN_WIDTH,
        }
    }
}

impl ReportStyle {
    /// Fill for the data row at 1-based `position` (the first row after the
    /// header is position 1). Depends only on parity, never on sheet row.
    pub fn data_fill(&self, position: usize) -> &str {
        if position % 2 == 0 {
            &self.even_row_fill
        } else {
            &self.odd_row_fill
        }
    }
}

/// Solid fills are stored as opaque ARGB.
fn argb(rgb: &str) -> String {
    format!("FF{}", rgb.trim_start_matches('#').to_ascii_uppercase())
}

/// Builds the workbook in memory: header on row 1, data rows from row 2 in
/// table order, every cell stored as a string.
#[instrument(level = "debug", skip_all, fields(rows = table.row_count(), columns = table.column_count()))]
pub fn render(table: &Table, style: &ReportStyle) -> Spreadsheet {
    let mut book = umya_spreadsheet::new_file();
    let sheet = book.get_active_sheet_mut();
    sheet.set_name(style.sheet_name.clone());

    let header_argb = argb(&style.header_fill);
    write_row(sheet, 1, table.headers(), &header_argb);

    for (idx, row) in table.rows().iter().enumerate() {
        let position = idx + 1;
        write_row(sheet, sheet_row(position), row, &argb(style.data_fill(position)));
    }

    for col in 1..=to_u32(table.column_count()) {
        sheet
            .get_column_dimension_by_number_mut(&col)
            .set_width(style.column_width);
    }
    debug!("rendered sheet {}", style.sheet_name);

    book
}

/// Renders `table` and writes it to `path` as `.xlsx`.
#[instrument(level = "info", skip(table, style, path), fields(path = %path.as_ref().display()))]
pub fn write_report<P: AsRef<Path>>(table: &Table, style: &ReportStyle, path: P) -> Result<()> {
    let book = render(table, style);
    umya_spreadsheet::writer::xlsx::write(&book, path.as_ref()).map_err(|source| {
        ReportError::WriteFailure {
            path: path.as_ref().to_path_buf(),
            source,
        }
    })?;
    info!(rows = table.row_count(), "report written");
    Ok(())
}

fn write_row(sheet: &mut Worksheet, row: u32, cells: &[String], fill: &str) {
    for (idx, value) in cells.iter().enumerate() {
        let coord = (to_u32(idx + 1), row);
        sheet.get_cell_mut(coord).set_value_string(value.clone());
        sheet.get_style_mut(coord).set_background_color(fill);
    }
}

/// Sheet row for a 1-based data position: the header occupies row 1.
fn sheet_row(position: usize) -> u32 {
    to_u32(position + 1)
}

// `Table` never exceeds the xlsx sheet limits, so indices always fit
fn to_u32(n: usize) -> u32 {
    n as u32
}
