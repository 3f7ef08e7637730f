//! Feature-point reference catalog: import from CSV/XLSX, export merged with
//! annotation pixels.

mod csv_import;
mod export;
mod xlsx;

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::annotation::parse_coordinate;
use crate::api::types::NewBuildingPoint;
use crate::error::{GeodotError, Result};

pub use csv_import::read_csv;
pub use export::{export_csv, write_csv};
pub use xlsx::read_xlsx;

/// One imported catalog row. Only `name` is mandatory.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeaturePointReference {
    pub object_id: Option<String>,
    pub symbol: Option<String>,
    pub name: String,
    pub height: Option<String>,
    pub longitude: Option<String>,
    pub latitude: Option<String>,
    pub elevation: Option<String>,
}

impl FeaturePointReference {
    /// `"{symbol}-{name}"` when a symbol is present, else the bare name.
    pub fn key(&self) -> String {
        catalog_key(self.symbol.as_deref(), &self.name)
    }

    /// Cells in `CATALOG_HEADERS` order.
    pub fn cells(&self) -> [&str; 7] {
        fn cell(v: &Option<String>) -> &str {
            v.as_deref().unwrap_or("")
        }
        [
            cell(&self.object_id),
            cell(&self.symbol),
            &self.name,
            cell(&self.height),
            cell(&self.longitude),
            cell(&self.latitude),
            cell(&self.elevation),
        ]
    }

    /// Building-point body for the bulk upload, when both coordinates parse.
    pub fn to_building_point(&self) -> Option<NewBuildingPoint> {
        Some(NewBuildingPoint {
            name: self.name.clone(),
            longitude: self.longitude.as_deref().and_then(parse_coordinate)?,
            latitude: self.latitude.as_deref().and_then(parse_coordinate)?,
        })
    }
}

pub fn catalog_key(symbol: Option<&str>, name: &str) -> String {
    match symbol.map(str::trim).filter(|s| !s.is_empty()) {
        Some(symbol) => format!("{symbol}-{}", name.trim()),
        None => name.trim().to_string(),
    }
}

/// Keyed, order-preserving set of catalog rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeatureCatalog {
    entries: Vec<FeaturePointReference>,
    index: HashMap<String, usize>,
}

impl FeatureCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog; a later row with an existing key replaces the earlier
    /// one in place.
    pub fn from_entries(rows: impl IntoIterator<Item = FeaturePointReference>) -> Self {
        let mut catalog = Self::default();
        for row in rows {
            catalog.insert(row);
        }
        catalog
    }

    /// Load a `.csv`, `.xlsx` or `.xls` file, picked by extension.
    pub fn import(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let rows = match extension.as_str() {
            "csv" => read_csv(std::fs::File::open(path)?)?,
            "xlsx" | "xlsm" | "xls" => read_xlsx(path)?,
            other => {
                return Err(GeodotError::Parse(format!(
                    "Unsupported catalog format {other:?}, expected csv or xlsx"
                )));
            }
        };
        let catalog = Self::from_entries(rows);
        info!(path = %path.display(), entries = catalog.len(), "Imported feature catalog");
        Ok(catalog)
    }

    pub fn insert(&mut self, entry: FeaturePointReference) {
        let key = entry.key();
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot] = entry,
            None => {
                self.index.insert(key, self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&FeaturePointReference> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn find(&self, symbol: Option<&str>, name: &str) -> Option<&FeaturePointReference> {
        self.get(&catalog_key(symbol, name))
    }

    pub fn entries(&self) -> &[FeaturePointReference] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FeaturePointReference> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rows with usable coordinates, as building-point upload bodies.
    pub fn to_building_points(&self) -> Vec<NewBuildingPoint> {
        self.entries
            .iter()
            .filter_map(|entry| {
                let point = entry.to_building_point();
                if point.is_none() {
                    warn!(name = %entry.name, "Catalog entry has no usable coordinates, not uploaded");
                }
                point
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a FeatureCatalog {
    type Item = &'a FeaturePointReference;
    type IntoIter = std::slice::Iter<'a, FeaturePointReference>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Map header names to column positions, requiring `Name`.
pub(crate) fn header_positions<'a>(
    headers: impl IntoIterator<Item = &'a str>,
) -> Result<[Option<usize>; 7]> {
    let mut positions = [None; 7];
    for (col, header) in headers.into_iter().enumerate() {
        let header = header.trim_start_matches(crate::consts::UTF8_BOM).trim();
        if let Some(slot) = crate::consts::CATALOG_HEADERS
            .iter()
            .position(|h| h.eq_ignore_ascii_case(header))
        {
            positions[slot].get_or_insert(col);
        }
    }
    if positions[2].is_none() {
        return Err(GeodotError::Parse("Catalog is missing the Name column".into()));
    }
    Ok(positions)
}

/// Build one row from positional cells; `None` for rows without a name.
pub(crate) fn row_from_cells(positions: &[Option<usize>; 7], cell: impl Fn(usize) -> Option<String>) -> Option<FeaturePointReference> {
    let field = |slot: usize| {
        positions[slot]
            .and_then(&cell)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };
    let name = field(2)?;
    Some(FeaturePointReference {
        object_id: field(0),
        symbol: field(1),
        name,
        height: field(3),
        longitude: field(4),
        latitude: field(5),
        elevation: field(6),
    })
}
