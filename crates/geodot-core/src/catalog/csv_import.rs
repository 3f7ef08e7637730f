use std::io::Read;

use tracing::warn;

use crate::error::Result;

use super::{header_positions, row_from_cells, FeaturePointReference};

/// Parse catalog rows from CSV. A leading BOM is tolerated, blank lines are
/// skipped and rows without a name are dropped with a warning.
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<FeaturePointReference>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let positions = header_positions(reader.headers()?.iter())?;

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        match row_from_cells(&positions, |col| record.get(col).map(str::to_string)) {
            Some(row) => rows.push(row),
            // Header is line 1.
            None => warn!(line = line + 2, "Catalog row has no name, skipped"),
        }
    }
    Ok(rows)
}
