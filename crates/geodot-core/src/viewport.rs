//! Image-space ↔ canvas-space mapping.
//!
//! `canvas = image * scale + offset` for every draw and every hit-test. The
//! transform has no notion of whether an image is loaded; callers that own
//! that knowledge (the input controller and the session) skip zooming when
//! there is nothing on screen.

use tracing::debug;

use crate::config::ViewportConfig;
use crate::geometry::{Size, Vec2};

/// Wheel direction for a single zoom step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Wheel deltas follow the browser convention: negative `delta_y` scrolls up, which zooms in.
    pub fn from_wheel_delta(delta_y: f64) -> Option<Self> {
        if delta_y < 0.0 {
            Some(Self::In)
        } else if delta_y > 0.0 {
            Some(Self::Out)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTransform {
    pub scale: f64,
    pub offset: Vec2,
}

impl Default for ViewportTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
        }
    }
}

impl ViewportTransform {
    pub fn new(scale: f64, offset: Vec2) -> Self {
        Self { scale, offset }
    }

    /// Fit the whole image inside the container without upscaling past 100%,
    /// centred. Discards any previous pan/zoom.
    pub fn fit_to_container(image: Size, container: Size) -> Self {
        if image.is_empty() || container.is_empty() {
            return Self::default();
        }
        let scale = (container.width / image.width)
            .min(container.height / image.height)
            .min(1.0);
        Self::centered(image, container, scale)
    }

    /// Contain-fit that may upscale; used to lay a photograph out on a print page.
    pub fn fit_to_page(image: Size, page: Size) -> Self {
        if image.is_empty() || page.is_empty() {
            return Self::default();
        }
        let scale = (page.width / image.width).min(page.height / image.height);
        Self::centered(image, page, scale)
    }

    fn centered(image: Size, container: Size, scale: f64) -> Self {
        let offset = Vec2::new(
            (container.width - image.width * scale) / 2.0,
            (container.height - image.height * scale) / 2.0,
        );
        Self { scale, offset }
    }

    /// One wheel notch about `focal` (canvas space) with the default limits.
    pub fn zoom(&mut self, focal: Vec2, direction: ZoomDirection) {
        self.zoom_with(focal, direction, &ViewportConfig::default());
    }

    /// One wheel notch about `focal` (canvas space).
    pub fn zoom_with(&mut self, focal: Vec2, direction: ZoomDirection, config: &ViewportConfig) {
        let factor = config.step_factor(direction == ZoomDirection::In);
        let target = config.clamp_scale(self.scale * factor);
        self.rescale_around(focal, target);
    }

    /// Set an absolute scale, clamped, keeping `focal` fixed on screen.
    pub fn set_scale_around(&mut self, focal: Vec2, scale: f64, config: &ViewportConfig) {
        let target = config.clamp_scale(scale);
        self.rescale_around(focal, target);
    }

    /// `target` must already be clamped; the offset is derived from the
    /// effective ratio so the focal point stays put.
    fn rescale_around(&mut self, focal: Vec2, target: f64) {
        let ratio = target / self.scale;
        self.offset = focal - (focal - self.offset) * ratio;
        self.scale = target;
        debug!(scale = self.scale, x = self.offset.x, y = self.offset.y, "Viewport zoomed");
    }

    /// Translate by a canvas-space delta. The image may leave the view entirely.
    pub fn pan(&mut self, delta_x: f64, delta_y: f64) {
        self.offset += Vec2::new(delta_x, delta_y);
    }

    pub fn to_image_space(&self, canvas: Vec2) -> Vec2 {
        Vec2::new(
            (canvas.x - self.offset.x) / self.scale,
            (canvas.y - self.offset.y) / self.scale,
        )
    }

    pub fn to_canvas_space(&self, image: Vec2) -> Vec2 {
        image * self.scale + self.offset
    }

    /// Zoom level as a rounded percentage, for the zoom control.
    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round().max(0.0) as u32
    }
}
