//! Application state and the operations the front-ends drive.
//!
//! A `Session` owns everything one user works on: the open image, its
//! annotation store, the viewport transform and input controller, the form,
//! the imported catalog and the building-point list. Operations that need the
//! backend return an `ApiRequest`; the caller runs it (on a worker thread in
//! the GUI, inline in the CLI) and hands the `ApiResponse` back to `apply`, or
//! the error to `fail`. Local state changes only once a response confirms it.

use image::DynamicImage;
use tracing::{info, warn};

use crate::annotation::{AnnotationForm, AnnotationStore, Point};
use crate::api::types::{
    BuildingPoint, BuildingPointsUpload, CameraPosition, FeatureRecord, ImageSummary,
};
use crate::api::{ApiRequest, ApiResponse};
use crate::catalog::FeatureCatalog;
use crate::config::AppConfig;
use crate::error::{GeodotError, Result, ValidationError};
use crate::geometry::{Size, Vec2};
use crate::input::{InputContext, InputController, InputEffect, InputEvent};
use crate::viewport::{ViewportTransform, ZoomDirection};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Toast-style message for the user.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// The photograph currently on the canvas.
#[derive(Clone, Debug)]
pub struct LoadedImage {
    /// Backend id; `None` for a local file that was never uploaded.
    pub id: Option<i64>,
    pub name: String,
    pub pixels: DynamicImage,
}

impl LoadedImage {
    pub fn size(&self) -> Size {
        Size::from_pixels(self.pixels.width(), self.pixels.height())
    }
}

pub struct Session {
    config: AppConfig,
    image: Option<LoadedImage>,
    /// Bumped whenever `image` changes, so front-ends know to re-upload textures.
    image_generation: u64,
    pub store: AnnotationStore,
    pub transform: ViewportTransform,
    pub form: AnnotationForm,
    controller: InputController,
    container: Size,
    pointer: Option<Vec2>,
    images: Vec<ImageSummary>,
    building_points: Vec<BuildingPoint>,
    catalog: FeatureCatalog,
    camera: Option<CameraPosition>,
    notices: Vec<Notice>,
}

impl Session {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            image: None,
            image_generation: 0,
            store: AnnotationStore::new(),
            transform: ViewportTransform::default(),
            form: AnnotationForm::default(),
            controller: InputController::new(),
            container: Size::default(),
            pointer: None,
            images: Vec::new(),
            building_points: Vec::new(),
            catalog: FeatureCatalog::new(),
            camera: None,
            notices: Vec::new(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: AppConfig) {
        self.config = config;
    }

    pub fn image(&self) -> Option<&LoadedImage> {
        self.image.as_ref()
    }

    pub fn image_generation(&self) -> u64 {
        self.image_generation
    }

    pub fn image_id(&self) -> Option<i64> {
        self.image.as_ref().and_then(|i| i.id)
    }

    pub fn images(&self) -> &[ImageSummary] {
        &self.images
    }

    pub fn building_points(&self) -> &[BuildingPoint] {
        &self.building_points
    }

    pub fn catalog(&self) -> &FeatureCatalog {
        &self.catalog
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    pub fn is_panning(&self) -> bool {
        self.controller.is_panning()
    }

    /// Camera result waiting to be shown; cleared when taken.
    pub fn take_camera_result(&mut self) -> Option<CameraPosition> {
        self.camera.take()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice::new(level, message));
    }

    // ---- viewport ----

    /// Record the canvas size. The first size seen for an image fits it.
    pub fn set_container(&mut self, container: Size) {
        let first = self.container.is_empty();
        self.container = container;
        if first {
            self.fit_to_view();
        }
    }

    pub fn fit_to_view(&mut self) {
        if let Some(image) = &self.image {
            self.transform = ViewportTransform::fit_to_container(image.size(), self.container);
        }
    }

    /// Zoom percent control; zooms about the container centre.
    pub fn set_zoom_percent(&mut self, percent: u32) {
        if self.image.is_none() {
            return;
        }
        let scale = f64::from(percent) / 100.0;
        self.transform
            .set_scale_around(self.container.center(), scale, &self.config.viewport);
    }

    /// Zoom button step about the container centre.
    pub fn zoom_step(&mut self, direction: ZoomDirection) {
        if self.image.is_none() {
            return;
        }
        self.transform
            .zoom_with(self.container.center(), direction, &self.config.viewport);
    }

    // ---- input ----

    pub fn handle_input(&mut self, event: &InputEvent) -> Vec<InputEffect> {
        let mut ctx = InputContext {
            transform: &mut self.transform,
            store: &mut self.store,
            form: &self.form,
            image_loaded: self.image.is_some(),
            viewport: &self.config.viewport,
            annotation: &self.config.annotation,
        };
        let effects = self.controller.handle(event, &mut ctx);
        for effect in &effects {
            match effect {
                InputEffect::Warning(e) => self.notify(NoticeLevel::Warning, e.to_string()),
                InputEffect::PointerAt(p) => self.pointer = Some(*p),
                _ => {}
            }
        }
        if matches!(event, InputEvent::PointerLeave) {
            self.pointer = None;
        }
        effects
    }

    // ---- image ----

    pub fn refresh_images(&self) -> ApiRequest {
        ApiRequest::ListImages
    }

    pub fn open_image(&self, image_id: i64) -> ApiRequest {
        ApiRequest::OpenImage { image_id }
    }

    /// Show a local photograph with an empty annotation list. Saving needs a
    /// backend image, so such a session can annotate and export only.
    pub fn open_local_image(&mut self, name: impl Into<String>, pixels: DynamicImage) {
        let name = name.into();
        info!(%name, width = pixels.width(), height = pixels.height(), "Opened local image");
        self.replace_image(
            LoadedImage {
                id: None,
                name,
                pixels,
            },
            Vec::new(),
        );
    }

    fn replace_image(&mut self, image: LoadedImage, points: Vec<Point>) {
        self.image = Some(image);
        self.image_generation += 1;
        self.store.load(points);
        self.controller.reset();
        self.pointer = None;
        self.fit_to_view();
    }

    // ---- annotations ----

    /// Persist every point of the open image.
    pub fn save_points(&self) -> std::result::Result<ApiRequest, ValidationError> {
        let image = self.image.as_ref().ok_or(ValidationError::NoImage)?;
        let image_id = image.id.ok_or(ValidationError::ImageNotPersisted)?;
        if self.store.is_empty() {
            return Err(ValidationError::NothingToSave);
        }
        Ok(ApiRequest::UploadFeatures {
            image_id,
            payload: self.store.serialize(image_id, &self.form),
        })
    }

    /// Delete one row. Points the backend has never seen go immediately;
    /// persisted ones wait for the backend to confirm.
    pub fn delete_point(&mut self, index: usize) -> Result<Option<ApiRequest>> {
        let point = self
            .store
            .get(index)
            .ok_or_else(|| GeodotError::not_found(format!("Point #{}", index + 1)))?;
        match (self.image_id(), point.id) {
            (Some(image_id), Some(feature_id)) => Ok(Some(ApiRequest::DeleteFeature {
                image_id,
                feature_id,
                index,
            })),
            _ => {
                self.store.remove_at(index)?;
                self.notify(NoticeLevel::Success, "Point removed");
                Ok(None)
            }
        }
    }

    /// Remove every annotation of the open image.
    pub fn clear_points(&mut self) -> std::result::Result<Option<ApiRequest>, ValidationError> {
        if self.image.is_none() {
            return Err(ValidationError::NoImage);
        }
        match self.image_id() {
            Some(image_id) => Ok(Some(ApiRequest::ClearFeatures { image_id })),
            None => {
                self.store.clear();
                self.notify(NoticeLevel::Success, "All points cleared");
                Ok(None)
            }
        }
    }

    pub fn calculate_camera(&self) -> std::result::Result<ApiRequest, ValidationError> {
        self.image.as_ref().ok_or(ValidationError::NoImage)?;
        let image_id = self.image_id().ok_or(ValidationError::ImageNotPersisted)?;
        Ok(ApiRequest::CalculateCamera { image_id })
    }

    // ---- building points ----

    pub fn refresh_building_points(&self) -> ApiRequest {
        ApiRequest::ListBuildingPoints
    }

    pub fn save_building_point(&self) -> std::result::Result<ApiRequest, ValidationError> {
        Ok(ApiRequest::CreateBuildingPoint(self.form.to_building_point()?))
    }

    pub fn select_building_point(&mut self, id: i64) -> Result<()> {
        let point = self
            .building_points
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| GeodotError::not_found(format!("Building point {id}")))?;
        self.form.prefill_from_building_point(point);
        Ok(())
    }

    // ---- catalog ----

    /// Replace the catalog; returns the bulk upload when configured.
    pub fn set_catalog(&mut self, catalog: FeatureCatalog) -> Option<ApiRequest> {
        let count = catalog.len();
        self.catalog = catalog;
        self.notify(
            NoticeLevel::Success,
            format!("Imported {count} catalog entries"),
        );
        if !self.config.catalog.upload_on_import {
            return None;
        }
        let points = self.catalog.to_building_points();
        (!points.is_empty()).then(|| ApiRequest::UploadBuildingPoints(BuildingPointsUpload { points }))
    }

    pub fn select_catalog_entry(&mut self, key: &str) -> Result<()> {
        let entry = self
            .catalog
            .get(key)
            .ok_or_else(|| GeodotError::not_found(format!("Catalog entry {key:?}")))?;
        self.form.prefill_from_catalog(entry);
        Ok(())
    }

    // ---- responses ----

    /// Apply a confirmed backend result. May return a follow-up request,
    /// such as reloading a list the response invalidated.
    pub fn apply(&mut self, response: ApiResponse) -> Option<ApiRequest> {
        match response {
            ApiResponse::Images(images) => {
                self.notify(NoticeLevel::Info, format!("Loaded {} images", images.len()));
                self.images = images;
                None
            }
            ApiResponse::ImageOpened {
                record,
                bytes,
                features,
            } => {
                let pixels = match image::load_from_memory(&bytes) {
                    Ok(pixels) => pixels,
                    Err(e) => {
                        self.notify(
                            NoticeLevel::Error,
                            format!("Cannot decode image {}: {e}", record.name),
                        );
                        return None;
                    }
                };
                let points = self.points_from_features(features);
                info!(id = record.id, name = %record.name, points = points.len(), "Opened image");
                self.notify(
                    NoticeLevel::Info,
                    format!("Opened {} with {} points", record.name, points.len()),
                );
                self.replace_image(
                    LoadedImage {
                        id: Some(record.id),
                        name: record.name,
                        pixels,
                    },
                    points,
                );
                None
            }
            ApiResponse::Features { image_id, features } => {
                if self.image_id() != Some(image_id) {
                    warn!(
                        response = image_id,
                        current = ?self.image_id(),
                        "Annotations arrived for an image that is no longer open"
                    );
                }
                let points = self.points_from_features(features);
                self.store.load(points);
                None
            }
            ApiResponse::FeaturesUploaded { image_id, ack } => {
                self.notify(NoticeLevel::Success, ack.message_or("Annotations saved"));
                Some(ApiRequest::ListFeatures { image_id })
            }
            ApiResponse::FeatureDeleted {
                image_id,
                feature_id,
                index,
            } => {
                if self.image_id() != Some(image_id) {
                    warn!(image_id, feature_id, "Delete confirmed for an image that is no longer open");
                    return None;
                }
                // Match on the id; rows may have shifted since the request was made.
                match self.store.remove_by_id(feature_id) {
                    Ok(_) => self.notify(NoticeLevel::Success, "Point deleted"),
                    Err(e) => warn!(error = %e, index, "Deleted point was already gone"),
                }
                None
            }
            ApiResponse::FeaturesCleared { image_id } => {
                if self.image_id() == Some(image_id) {
                    self.store.clear();
                    self.notify(NoticeLevel::Success, "All points cleared");
                } else {
                    warn!(image_id, "Clear confirmed for an image that is no longer open");
                }
                None
            }
            ApiResponse::BuildingPoints(points) => {
                self.building_points = points;
                None
            }
            ApiResponse::BuildingPointCreated(ack) => {
                self.notify(NoticeLevel::Success, ack.message_or("Building point saved"));
                self.form.clear();
                Some(ApiRequest::ListBuildingPoints)
            }
            ApiResponse::BuildingPointsUploaded { count, ack } => {
                self.notify(
                    NoticeLevel::Success,
                    ack.message_or(&format!("Uploaded {count} building points")),
                );
                Some(ApiRequest::ListBuildingPoints)
            }
            ApiResponse::Camera { image_id, position } => {
                info!(image_id, position = %position, "Camera position calculated");
                self.camera = Some(position);
                None
            }
        }
    }

    /// Record a failed request. Nothing else changes.
    pub fn fail(&mut self, request: &ApiRequest, error: &GeodotError) {
        warn!(request = request.describe(), error = %error, "Backend request failed");
        self.notify(
            NoticeLevel::Error,
            format!("Failed to {}: {error}", request.describe()),
        );
    }

    /// Surface a local validation problem.
    pub fn warn(&mut self, error: &ValidationError) {
        self.notify(NoticeLevel::Warning, error.to_string());
    }

    fn points_from_features(&self, features: Vec<FeatureRecord>) -> Vec<Point> {
        let fallback = &self.config.annotation.default_point_name;
        features
            .into_iter()
            .map(|f| point_from_feature(f, fallback))
            .collect()
    }
}

/// Backend record to store entry. A missing name gets `fallback`; `label`
/// becomes the symbol.
pub fn point_from_feature(feature: FeatureRecord, fallback: &str) -> Point {
    Point {
        id: feature.id,
        x: feature.pixel_x,
        y: feature.pixel_y,
        name: feature
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string()),
        symbol: feature.label.filter(|l| !l.is_empty()),
        longitude: feature.longitude,
        latitude: feature.latitude,
        building_point_id: feature.building_point_id,
    }
}
