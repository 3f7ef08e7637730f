use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use tracing::warn;

use crate::error::{GeodotError, Result};

use super::{header_positions, row_from_cells, FeaturePointReference};

/// Parse catalog rows from the first worksheet of a workbook.
pub fn read_xlsx(path: &Path) -> Result<Vec<FeaturePointReference>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| GeodotError::Parse("Workbook has no worksheets".into()))??;

    let mut rows_iter = range.rows();
    let header: Vec<String> = rows_iter
        .next()
        .ok_or_else(|| GeodotError::Parse("Worksheet is empty".into()))?
        .iter()
        .map(cell_text)
        .collect();
    let positions = header_positions(header.iter().map(String::as_str))?;

    let mut rows = Vec::new();
    for (line, cells) in rows_iter.enumerate() {
        if cells.iter().all(|c| cell_text(c).trim().is_empty()) {
            continue;
        }
        match row_from_cells(&positions, |col| cells.get(col).map(cell_text)) {
            Some(row) => rows.push(row),
            None => warn!(row = line + 2, "Worksheet row has no name, skipped"),
        }
    }
    Ok(rows)
}

/// Spreadsheet cells come back typed; whole floats drop their `.0`.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
