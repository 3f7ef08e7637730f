use serde::{Deserialize, Serialize};

use crate::error::{CoordinateField, ValidationError};
use crate::geometry::Vec2;

/// One annotation on the currently loaded image, in image-space pixels.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Backend id; `None` until the point has been persisted.
    pub id: Option<i64>,
    pub x: f64,
    pub y: f64,
    pub name: String,
    pub symbol: Option<String>,
    pub longitude: Option<String>,
    pub latitude: Option<String>,
    /// When set, the backend resolves longitude/latitude from the building point.
    pub building_point_id: Option<i64>,
}

impl Point {
    pub fn new(position: Vec2, name: impl Into<String>) -> Self {
        Self {
            x: position.x,
            y: position.y,
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Text drawn next to the marker: the symbol when there is one, else the name.
    pub fn label(&self) -> &str {
        match self.symbol.as_deref() {
            Some(symbol) if !symbol.is_empty() => symbol,
            _ => &self.name,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        check_coordinate(CoordinateField::Longitude, self.longitude.as_deref())?;
        check_coordinate(CoordinateField::Latitude, self.latitude.as_deref())?;
        Ok(())
    }
}

/// Accepts an optional minus sign, at least one digit, and an optional
/// fractional part (`12`, `-12.345`, `12.`). An empty string is "not provided"
/// and passes.
pub fn is_valid_coordinate(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    let unsigned = value.strip_prefix('-').unwrap_or(value);
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };
    !integer.is_empty()
        && integer.bytes().all(|b| b.is_ascii_digit())
        && fraction.is_none_or(|f| f.bytes().all(|b| b.is_ascii_digit()))
}

pub(crate) fn check_coordinate(
    field: CoordinateField,
    value: Option<&str>,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if !is_valid_coordinate(v) => Err(ValidationError::MalformedCoordinate {
            field,
            value: v.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Parse a validated coordinate string; empty and malformed input yield `None`.
pub fn parse_coordinate(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !is_valid_coordinate(trimmed) {
        return None;
    }
    trimmed.parse().ok()
}
