mod form;
mod point;
mod store;

pub use form::AnnotationForm;
pub use point::{is_valid_coordinate, parse_coordinate, Point};
pub use store::{AnnotationStore, InlineLocation, LocationSource, StoredLocation};
