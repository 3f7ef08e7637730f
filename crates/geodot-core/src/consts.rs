/// Smallest allowed viewport scale.
pub const MIN_SCALE: f64 = 0.1;

/// Largest allowed viewport scale.
pub const MAX_SCALE: f64 = 3.0;

/// Exponent step per wheel notch: scale is multiplied by `exp(±ZOOM_INTENSITY)`.
pub const ZOOM_INTENSITY: f64 = 0.1;

/// Fixed per-notch ratio used by `ZoomMode::Ratio`.
pub const ZOOM_RATIO: f64 = 1.1;

/// Scroll distance, in canvas pixels, that counts as one wheel notch.
pub const WHEEL_NOTCH: f64 = 50.0;

/// Bounds of the zoom percent control.
pub const MIN_ZOOM_PERCENT: u32 = 10;
pub const MAX_ZOOM_PERCENT: u32 = 300;

/// On-screen marker radius in canvas pixels.
pub const MARKER_RADIUS: f64 = 3.0;

/// On-screen label offset from the marker centre, in canvas pixels.
pub const LABEL_OFFSET: f64 = 5.0;

/// On-screen label font size in canvas pixels.
pub const LABEL_SIZE: f64 = 12.0;

/// A4 at 300 DPI.
pub const PRINT_PAGE_WIDTH: u32 = 2480;
pub const PRINT_PAGE_HEIGHT: u32 = 3508;

/// Marker radius and label size on the print page, in page pixels.
pub const PRINT_MARKER_RADIUS: f64 = 12.0;
pub const PRINT_LABEL_SIZE: f64 = 36.0;

/// Name given to backend features that arrive without one.
pub const DEFAULT_POINT_NAME: &str = "Unnamed point";

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Header row of the feature-point catalog CSV/XLSX.
pub const CATALOG_HEADERS: [&str; 7] = [
    "Objectid",
    "Symbol",
    "Name",
    "Height",
    "Longitude",
    "Latitude",
    "Elevation",
];

/// UTF-8 byte order mark written at the start of exported CSV files.
pub const UTF8_BOM: &str = "\u{feff}";
