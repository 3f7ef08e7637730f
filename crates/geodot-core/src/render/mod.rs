//! Drawing of the photograph and its annotation points.
//!
//! `CanvasRenderer` only talks to the `Canvas` trait, so the same code path
//! draws into the egui painter, into a print-resolution pixmap and into the
//! recording canvas used by tests.

mod raster;

use crate::annotation::Point;
use crate::config::RenderConfig;
use crate::geometry::{Size, Vec2};
use crate::viewport::ViewportTransform;

pub use raster::{export_print_image, load_font, pixmap_from_image, render_print_image, RasterCanvas};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba(pub [u8; 4]);

impl Rgba {
    pub const WHITE: Self = Self([255, 255, 255, 255]);
}

impl From<[u8; 4]> for Rgba {
    fn from(value: [u8; 4]) -> Self {
        Self(value)
    }
}

/// Minimal 2D context with a save/restore transform stack.
pub trait Canvas {
    /// Backend handle for a drawable photograph.
    type Image;

    fn clear(&mut self);
    fn save(&mut self);
    fn restore(&mut self);
    /// Post-multiply a translation onto the current transform.
    fn translate(&mut self, offset: Vec2);
    /// Post-multiply a uniform scale onto the current transform.
    fn scale(&mut self, factor: f64);
    /// Draw `image` with its top-left corner at the current origin, `size` in
    /// current units.
    fn draw_image(&mut self, image: &Self::Image, size: Size);
    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Rgba);
    /// `position` is the left end of the text baseline.
    fn fill_text(&mut self, text: &str, position: Vec2, size: f64, color: Rgba);
}

/// Redraws the whole scene from scratch on every call.
#[derive(Clone, Debug, Default)]
pub struct CanvasRenderer {
    style: RenderConfig,
}

impl CanvasRenderer {
    pub fn new(style: RenderConfig) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &RenderConfig {
        &self.style
    }

    pub fn render<C: Canvas>(
        &self,
        canvas: &mut C,
        image: Option<(&C::Image, Size)>,
        points: &[Point],
        transform: &ViewportTransform,
    ) {
        canvas.clear();
        let Some((image, size)) = image else {
            return;
        };

        canvas.save();
        canvas.translate(transform.offset);
        canvas.scale(transform.scale);
        canvas.draw_image(image, size);

        // Sizes are divided by scale so markers keep a constant on-screen size.
        let inv = 1.0 / transform.scale;
        let radius = self.style.marker_radius * inv;
        let font_size = self.style.label_size * inv;
        // Baseline sits below-right of the marker, so the text hugs its corner.
        let label_offset = Vec2::new(self.style.label_offset * inv, self.style.label_offset * inv);
        let marker = Rgba::from(self.style.marker_color);
        let label = Rgba::from(self.style.label_color);

        for point in points {
            let position = point.position();
            canvas.fill_circle(position, radius, marker);
            let text = point.label();
            if !text.is_empty() {
                canvas.fill_text(text, position + label_offset, font_size, label);
            }
        }
        canvas.restore();
    }
}
