#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;

use image::{DynamicImage, Rgba, RgbaImage};

use geodot_core::annotation::{AnnotationForm, Point};
use geodot_core::api::types::{
    Ack, BuildingPoint, BuildingPointsUpload, CameraPosition, FeatureRecord, ImageRecord,
    ImageSummary, NewBuildingPoint, UploadFeatures,
};
use geodot_core::api::AnnotationBackend;
use geodot_core::error::{GeodotError, Result};
use geodot_core::geometry::{Size, Vec2};
use geodot_core::render::{Canvas, Rgba as Colour};

/// Form with just a name filled in.
pub fn named_form(name: &str) -> AnnotationForm {
    AnnotationForm {
        name: name.to_string(),
        ..Default::default()
    }
}

pub fn point_at(x: f64, y: f64, name: &str) -> Point {
    Point::new(Vec2::new(x, y), name)
}

/// Solid-colour photograph.
pub fn solid_image(width: u32, height: u32, rgba: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(rgba)))
}

/// PNG bytes of a solid image, as the backend would serve them.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = std::io::Cursor::new(Vec::new());
    solid_image(width, height, [10, 20, 30, 255])
        .write_to(&mut buffer, image::ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

pub fn feature(id: i64, x: f64, y: f64, name: Option<&str>) -> FeatureRecord {
    FeatureRecord {
        id: Some(id),
        pixel_x: x,
        pixel_y: y,
        name: name.map(str::to_string),
        longitude: None,
        latitude: None,
        building_point_id: None,
        label: None,
    }
}

// ---------------------------------------------------------------------------
// Recording canvas
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Clear,
    Save,
    Restore,
    Translate(Vec2),
    Scale(f64),
    DrawImage(Size),
    Circle { center: Vec2, radius: f64, color: Colour },
    Text { text: String, position: Vec2, size: f64, color: Colour },
}

#[derive(Default)]
pub struct RecordingCanvas {
    pub ops: Vec<Op>,
}

impl Canvas for RecordingCanvas {
    type Image = ();

    fn clear(&mut self) {
        self.ops.push(Op::Clear);
    }

    fn save(&mut self) {
        self.ops.push(Op::Save);
    }

    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.ops.push(Op::Translate(offset));
    }

    fn scale(&mut self, factor: f64) {
        self.ops.push(Op::Scale(factor));
    }

    fn draw_image(&mut self, _image: &(), size: Size) {
        self.ops.push(Op::DrawImage(size));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Colour) {
        self.ops.push(Op::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, position: Vec2, size: f64, color: Colour) {
        self.ops.push(Op::Text {
            text: text.to_string(),
            position,
            size,
            color,
        });
    }
}

// ---------------------------------------------------------------------------
// Fake backend
// ---------------------------------------------------------------------------

/// In-memory backend that records calls and can be told to fail.
#[derive(Default)]
pub struct FakeBackend {
    pub images: Vec<ImageSummary>,
    pub features: RefCell<Vec<FeatureRecord>>,
    pub building_points: RefCell<Vec<BuildingPoint>>,
    pub image_bytes: Vec<u8>,
    pub uploads: RefCell<Vec<UploadFeatures>>,
    pub calls: RefCell<Vec<String>>,
    /// Errors returned by the next calls, in order.
    pub failures: RefCell<VecDeque<GeodotError>>,
}

impl FakeBackend {
    pub fn with_image(width: u32, height: u32) -> Self {
        Self {
            images: vec![ImageSummary {
                id: 7,
                name: "tower.jpg".into(),
                path: Some("/uploads/tower.jpg".into()),
            }],
            image_bytes: png_bytes(width, height),
            ..Default::default()
        }
    }

    pub fn fail_next(&self, error: GeodotError) {
        self.failures.borrow_mut().push_back(error);
    }

    fn call(&self, name: &str) -> Result<()> {
        self.calls.borrow_mut().push(name.to_string());
        match self.failures.borrow_mut().pop_front() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn ack(message: &str) -> Ack {
        Ack {
            status: Some("success".into()),
            message: Some(message.into()),
        }
    }
}

impl AnnotationBackend for FakeBackend {
    fn list_images(&self) -> Result<Vec<ImageSummary>> {
        self.call("list_images")?;
        Ok(self.images.clone())
    }

    fn get_image(&self, image_id: i64) -> Result<ImageRecord> {
        self.call("get_image")?;
        self.images
            .iter()
            .find(|i| i.id == image_id)
            .map(|i| ImageRecord {
                id: i.id,
                name: i.name.clone(),
                path: i.path.clone().unwrap_or_default(),
            })
            .ok_or_else(|| GeodotError::Http {
                status: 404,
                title: "Not found".into(),
                detail: "Image not found".into(),
            })
    }

    fn fetch_image_bytes(&self, _path: &str) -> Result<Vec<u8>> {
        self.call("fetch_image_bytes")?;
        Ok(self.image_bytes.clone())
    }

    fn delete_image(&self, _image_id: i64) -> Result<Ack> {
        self.call("delete_image")?;
        Ok(Self::ack("Image deleted"))
    }

    fn list_features(&self, _image_id: i64) -> Result<Vec<FeatureRecord>> {
        self.call("list_features")?;
        Ok(self.features.borrow().clone())
    }

    fn clear_features(&self, _image_id: i64) -> Result<()> {
        self.call("clear_features")?;
        self.features.borrow_mut().clear();
        Ok(())
    }

    fn delete_feature(&self, _image_id: i64, feature_id: i64) -> Result<()> {
        self.call("delete_feature")?;
        self.features.borrow_mut().retain(|f| f.id != Some(feature_id));
        Ok(())
    }

    fn upload_features(&self, payload: &UploadFeatures) -> Result<Ack> {
        self.call("upload_features")?;
        self.uploads.borrow_mut().push(payload.clone());
        let mut features = self.features.borrow_mut();
        features.clear();
        for (i, f) in payload.features.iter().enumerate() {
            features.push(FeatureRecord {
                id: Some(100 + i as i64),
                pixel_x: f.x,
                pixel_y: f.y,
                name: Some(f.name.clone()),
                longitude: f.longitude.map(|v| v.to_string()),
                latitude: f.latitude.map(|v| v.to_string()),
                building_point_id: f.building_point_id,
                label: f.symbol.clone(),
            });
        }
        Ok(Self::ack("Features saved"))
    }

    fn list_building_points(&self) -> Result<Vec<BuildingPoint>> {
        self.call("list_building_points")?;
        Ok(self.building_points.borrow().clone())
    }

    fn create_building_point(&self, point: &NewBuildingPoint) -> Result<Ack> {
        self.call("create_building_point")?;
        self.create_building_point_inner(point);
        Ok(Self::ack("Building point saved"))
    }

    fn upload_building_points(&self, payload: &BuildingPointsUpload) -> Result<Ack> {
        self.call("upload_building_points")?;
        for point in &payload.points {
            self.create_building_point_inner(point);
        }
        Ok(Ack::default())
    }

    fn update_building_point(&self, id: i64, point: &NewBuildingPoint) -> Result<Ack> {
        self.call("update_building_point")?;
        if let Some(existing) = self.building_points.borrow_mut().iter_mut().find(|p| p.id == id) {
            existing.name = point.name.clone();
            existing.longitude = point.longitude;
            existing.latitude = point.latitude;
        }
        Ok(Self::ack("Updated"))
    }

    fn delete_building_point(&self, id: i64) -> Result<Ack> {
        self.call("delete_building_point")?;
        self.building_points.borrow_mut().retain(|p| p.id != id);
        Ok(Self::ack("Deleted"))
    }

    fn calculate_camera_position(&self, _image_id: i64) -> Result<CameraPosition> {
        self.call("calculate_camera_position")?;
        Ok(CameraPosition {
            camera_position: [1.5, -2.0, 30.0],
            message: "Camera position calculated".into(),
        })
    }
}

impl FakeBackend {
    fn create_building_point_inner(&self, point: &NewBuildingPoint) {
        let mut points = self.building_points.borrow_mut();
        let id = points.len() as i64 + 1;
        points.push(BuildingPoint {
            id,
            name: point.name.clone(),
            longitude: point.longitude,
            latitude: point.latitude,
        });
    }
}
