// src/table.rs

use crate::error::{ReportError, Result};
use tracing::{debug, instrument};

/// Column separator used by the simulator's `$display` output.
pub const DELIMITER: char = '\t';

/// Widest sheet an xlsx file can hold.
pub const MAX_COLUMNS: usize = 16_384;
/// Sheet row limit (1,048,576) less the header row.
pub const MAX_DATA_ROWS: usize = 1_048_575;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Column names, from the first line of simulator output.
    headers: Vec<String>,
    /// Each following line, one String per field. Always `headers.len()` wide.
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Builds a table, rejecting any row whose width differs from the header's
    /// and any shape that will not fit on one xlsx sheet.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        if headers.len() > MAX_COLUMNS {
            return Err(ReportError::MalformedOutput(format!(
                "header has {} columns, a sheet holds at most {}",
                headers.len(),
                MAX_COLUMNS
            )));
        }
        if rows.len() > MAX_DATA_ROWS {
            return Err(ReportError::MalformedOutput(format!(
                "{} data rows, a sheet holds at most {}",
                rows.len(),
                MAX_DATA_ROWS
            )));
        }
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(ReportError::MalformedOutput(format!(
                    "data row {} has {} cells, header has {}",
                    idx + 1,
                    row.len(),
                    headers.len()
                )));
            }
        }
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when there is a header but no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Splits tab-delimited simulator output into a [`Table`].
///
/// The first line is the header; every later line is a data row. Cells are
/// kept verbatim. Both `\n` and `\r\n` line endings are accepted.
#[instrument(level = "debug", skip(text), fields(bytes = text.len()))]
pub fn parse_table(text: &str) -> Result<Table> {
    let mut lines = text.lines();
    let header_line = lines.next().ok_or_else(|| {
        ReportError::MalformedOutput("simulator produced no output (missing header line)".into())
    })?;

    let headers: Vec<String> = split_line(header_line);
    let rows: Vec<Vec<String>> = lines.map(split_line).collect();
    debug!(
        columns = headers.len(),
        rows = rows.len(),
        "parsed simulator output"
    );

    Table::new(headers, rows)
}

fn split_line(line: &str) -> Vec<String> {
    line.split(DELIMITER).map(str::to_string).collect()
}
