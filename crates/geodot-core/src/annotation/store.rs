use tracing::debug;

use crate::api::types::{UploadFeature, UploadFeatures};
use crate::error::{GeodotError, Result, ValidationError};

use super::point::{parse_coordinate, Point};

/// Name and inline coordinates for a point that is not linked to a building
/// point, supplied at serialization time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InlineLocation {
    pub name: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
}

/// Supplies inline name/longitude/latitude for unlinked points when the
/// upload payload is built.
pub trait LocationSource {
    fn location_for(&self, point: &Point) -> InlineLocation;
}

/// Uses each point's own stored fields.
pub struct StoredLocation;

impl LocationSource for StoredLocation {
    fn location_for(&self, point: &Point) -> InlineLocation {
        InlineLocation {
            name: None,
            longitude: point.longitude.as_deref().and_then(parse_coordinate),
            latitude: point.latitude.as_deref().and_then(parse_coordinate),
        }
    }
}

impl<F> LocationSource for F
where
    F: Fn(&Point) -> InlineLocation,
{
    fn location_for(&self, point: &Point) -> InlineLocation {
        self(point)
    }
}

/// Ordered points of the currently loaded image. Order is insertion order and
/// doubles as the 0-based row index used by delete-by-index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnnotationStore {
    points: Vec<Point>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the entire list (image switch or fresh backend data).
    pub fn load(&mut self, points: Vec<Point>) {
        debug!(count = points.len(), "Annotation list replaced");
        self.points = points;
    }

    /// Append a validated point; returns its index.
    pub fn add(&mut self, point: Point) -> std::result::Result<usize, ValidationError> {
        point.validate()?;
        self.points.push(point);
        let index = self.points.len() - 1;
        debug!(index, "Point added");
        Ok(index)
    }

    /// Swap the point at `index` for a validated replacement; returns the old one.
    pub fn replace(&mut self, index: usize, point: Point) -> Result<Point> {
        point.validate()?;
        let slot = self
            .points
            .get_mut(index)
            .ok_or_else(|| GeodotError::not_found(format!("Point #{}", index + 1)))?;
        Ok(std::mem::replace(slot, point))
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Point> {
        if index >= self.points.len() {
            return Err(GeodotError::not_found(format!("Point #{}", index + 1)));
        }
        debug!(index, "Point removed");
        Ok(self.points.remove(index))
    }

    pub fn remove_by_id(&mut self, id: i64) -> Result<Point> {
        let index = self
            .index_of_id(id)
            .ok_or_else(|| GeodotError::not_found(format!("Point with id {id}")))?;
        self.remove_at(index)
    }

    pub fn index_of_id(&self, id: i64) -> Option<usize> {
        self.points.iter().position(|p| p.id == Some(id))
    }

    pub fn get(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Build the `POST /api/upload_features` payload.
    ///
    /// Linked points carry only `building_point_id`; everything else gets its
    /// inline name/longitude/latitude from `source`, falling back to the
    /// point's own name.
    pub fn serialize(&self, image_id: i64, source: &impl LocationSource) -> UploadFeatures {
        let features = self
            .points
            .iter()
            .map(|point| {
                let symbol = point.symbol.clone().filter(|s| !s.is_empty());
                match point.building_point_id {
                    Some(building_point_id) => UploadFeature {
                        x: point.x,
                        y: point.y,
                        image_id,
                        name: point.name.clone(),
                        symbol,
                        longitude: None,
                        latitude: None,
                        building_point_id: Some(building_point_id),
                    },
                    None => {
                        let inline = source.location_for(point);
                        UploadFeature {
                            x: point.x,
                            y: point.y,
                            image_id,
                            name: inline
                                .name
                                .filter(|n| !n.is_empty())
                                .unwrap_or_else(|| point.name.clone()),
                            symbol,
                            longitude: inline.longitude,
                            latitude: inline.latitude,
                            building_point_id: None,
                        }
                    }
                }
            })
            .collect();
        UploadFeatures { features }
    }
}

impl<'a> IntoIterator for &'a AnnotationStore {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
