use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::annotation::Point;
use crate::consts::{CATALOG_HEADERS, UTF8_BOM};
use crate::error::Result;

use super::{catalog_key, FeatureCatalog};

/// Write the catalog merged with annotation pixels for `image_name`.
///
/// Every catalog row is kept; rows with no matching annotation get `0` in
/// both pixel columns. Annotations that match no row are appended after the
/// catalog with only symbol and name filled in. A point matches on its
/// `"{symbol}-{name}"` key first, then on the bare name.
pub fn write_csv<W: Write>(
    mut out: W,
    catalog: &FeatureCatalog,
    points: &[Point],
    image_name: &str,
) -> Result<()> {
    out.write_all(UTF8_BOM.as_bytes())?;
    let mut writer = csv::Writer::from_writer(out);

    let pixel_x = format!("Pixel_x_{image_name}");
    let pixel_y = format!("Pixel_y_{image_name}");
    let mut header: Vec<&str> = CATALOG_HEADERS.to_vec();
    header.push(&pixel_x);
    header.push(&pixel_y);
    writer.write_record(&header)?;

    let mut matched: HashMap<usize, &Point> = HashMap::new();
    let mut unmatched = Vec::new();
    for point in points {
        let by_key = catalog_key(point.symbol.as_deref(), &point.name);
        let slot = catalog
            .index
            .get(&by_key)
            .or_else(|| catalog.index.get(point.name.trim()))
            .copied();
        match slot {
            // First annotation wins when several name the same row.
            Some(slot) => {
                matched.entry(slot).or_insert(point);
            }
            None => unmatched.push(point),
        }
    }

    for (slot, entry) in catalog.entries.iter().enumerate() {
        let (x, y) = matched.get(&slot).map_or((0, 0), |p| pixel_cells(p));
        let mut record: Vec<String> = entry.cells().iter().map(|c| c.to_string()).collect();
        record.push(x.to_string());
        record.push(y.to_string());
        writer.write_record(&record)?;
    }

    for point in &unmatched {
        let (x, y) = pixel_cells(point);
        let (x, y) = (x.to_string(), y.to_string());
        writer.write_record([
            "",
            point.symbol.as_deref().unwrap_or(""),
            point.name.as_str(),
            "",
            point.longitude.as_deref().unwrap_or(""),
            point.latitude.as_deref().unwrap_or(""),
            "",
            x.as_str(),
            y.as_str(),
        ])?;
    }

    writer.flush()?;
    info!(
        rows = catalog.len(),
        matched = matched.len(),
        appended = unmatched.len(),
        "Wrote merged catalog CSV"
    );
    Ok(())
}

pub fn export_csv(
    path: &Path,
    catalog: &FeatureCatalog,
    points: &[Point],
    image_name: &str,
) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_csv(std::io::BufWriter::new(file), catalog, points, image_name)
}

fn pixel_cells(point: &Point) -> (i64, i64) {
    (point.x.round() as i64, point.y.round() as i64)
}
