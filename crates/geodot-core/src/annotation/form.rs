use crate::api::types::{BuildingPoint, NewBuildingPoint};
use crate::catalog::FeaturePointReference;
use crate::error::{CoordinateField, ValidationError};
use crate::geometry::Vec2;

use super::point::{check_coordinate, parse_coordinate, Point};
use super::store::{InlineLocation, LocationSource};

/// The editable fields a new point is created from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnnotationForm {
    pub name: String,
    pub symbol: String,
    pub longitude: String,
    pub latitude: String,
    /// Set when the fields were filled from a stored building point.
    pub building_point_id: Option<i64>,
}

impl AnnotationForm {
    /// Check the fields needed to place a point.
    pub fn validate(&self, require_symbol: bool) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingName);
        }
        if require_symbol && self.symbol.trim().is_empty() {
            return Err(ValidationError::MissingSymbol);
        }
        check_coordinate(CoordinateField::Longitude, non_empty(&self.longitude))?;
        check_coordinate(CoordinateField::Latitude, non_empty(&self.latitude))?;
        Ok(())
    }

    /// Build a point at `position` (image space) from the current fields.
    pub fn to_point(&self, position: Vec2, require_symbol: bool) -> Result<Point, ValidationError> {
        self.validate(require_symbol)?;
        Ok(Point {
            id: None,
            x: position.x,
            y: position.y,
            name: self.name.trim().to_string(),
            symbol: non_empty(&self.symbol).map(str::to_string),
            longitude: non_empty(&self.longitude).map(str::to_string),
            latitude: non_empty(&self.latitude).map(str::to_string),
            building_point_id: self.building_point_id,
        })
    }

    /// Body for `POST /api/upload_building_point`. All three fields are required.
    pub fn to_building_point(&self) -> Result<NewBuildingPoint, ValidationError> {
        let name = self.name.trim();
        let (Some(lon), Some(lat)) = (non_empty(&self.longitude), non_empty(&self.latitude)) else {
            return Err(ValidationError::IncompleteBuildingPoint);
        };
        if name.is_empty() {
            return Err(ValidationError::IncompleteBuildingPoint);
        }
        check_coordinate(CoordinateField::Longitude, Some(lon))?;
        check_coordinate(CoordinateField::Latitude, Some(lat))?;
        Ok(NewBuildingPoint {
            name: name.to_string(),
            longitude: parse_coordinate(lon).ok_or_else(|| malformed(CoordinateField::Longitude, lon))?,
            latitude: parse_coordinate(lat).ok_or_else(|| malformed(CoordinateField::Latitude, lat))?,
        })
    }

    pub fn prefill_from_building_point(&mut self, point: &BuildingPoint) {
        self.name = point.name.clone();
        self.longitude = point.longitude.to_string();
        self.latitude = point.latitude.to_string();
        self.building_point_id = Some(point.id);
    }

    pub fn prefill_from_catalog(&mut self, entry: &FeaturePointReference) {
        self.name = entry.name.clone();
        self.symbol = entry.symbol.clone().unwrap_or_default();
        self.longitude = entry.longitude.clone().unwrap_or_default();
        self.latitude = entry.latitude.clone().unwrap_or_default();
        self.building_point_id = None;
    }

    /// Forget the building-point link, e.g. after the user edits a field by hand.
    pub fn unlink(&mut self) {
        self.building_point_id = None;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Unlinked points take the name and coordinates currently in the form,
/// falling back to what the point itself stores.
impl LocationSource for AnnotationForm {
    fn location_for(&self, point: &Point) -> InlineLocation {
        let from_form = |value: &str, stored: &Option<String>| {
            parse_coordinate(value).or_else(|| stored.as_deref().and_then(parse_coordinate))
        };
        InlineLocation {
            name: non_empty(&self.name).map(str::to_string),
            longitude: from_form(&self.longitude, &point.longitude),
            latitude: from_form(&self.latitude, &point.latitude),
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn malformed(field: CoordinateField, value: &str) -> ValidationError {
    ValidationError::MalformedCoordinate {
        field,
        value: value.to_string(),
    }
}
