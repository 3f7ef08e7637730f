use std::path::Path;

use ab_glyph::FontArc;
use image::{DynamicImage, RgbaImage};
use imageproc::drawing::draw_text_mut;
use tiny_skia::{FillRule, IntSize, Paint, PathBuilder, Pixmap, PixmapPaint, Transform};
use tracing::{info, warn};

use crate::annotation::Point;
use crate::config::{ExportConfig, RenderConfig};
use crate::error::{GeodotError, Result};
use crate::geometry::{Size, Vec2};
use crate::viewport::ViewportTransform;

use super::{Canvas, CanvasRenderer, Rgba};

/// Label queued in page pixels, burned in after the shapes.
struct PendingLabel {
    text: String,
    position: Vec2,
    size: f32,
    color: Rgba,
}

/// Offscreen canvas backed by a tiny-skia pixmap. Text is drawn in a second
/// pass with imageproc because tiny-skia has no text support.
pub struct RasterCanvas {
    pixmap: Pixmap,
    background: Rgba,
    transform: Transform,
    stack: Vec<Transform>,
    labels: Vec<PendingLabel>,
}

impl RasterCanvas {
    pub fn new(width: u32, height: u32, background: Rgba) -> Result<Self> {
        let pixmap = Pixmap::new(width, height)
            .ok_or_else(|| GeodotError::Render(format!("cannot allocate {width}x{height} page")))?;
        Ok(Self {
            pixmap,
            background,
            transform: Transform::identity(),
            stack: Vec::new(),
            labels: Vec::new(),
        })
    }

    pub fn size(&self) -> Size {
        Size::from_pixels(self.pixmap.width(), self.pixmap.height())
    }

    /// Finish the page: shapes from the pixmap, then labels if a font is given.
    pub fn into_image(self, font: Option<&FontArc>) -> Result<RgbaImage> {
        let (width, height) = (self.pixmap.width(), self.pixmap.height());
        let mut output = RgbaImage::from_raw(width, height, self.pixmap.take())
            .ok_or_else(|| GeodotError::Render("cannot construct output image".into()))?;

        match font {
            Some(font) => {
                for label in &self.labels {
                    // imageproc positions text by its top edge.
                    draw_text_mut(
                        &mut output,
                        image::Rgba(label.color.0),
                        label.position.x as i32,
                        (label.position.y - f64::from(label.size)) as i32,
                        label.size,
                        font,
                        &label.text,
                    );
                }
            }
            None if !self.labels.is_empty() => {
                warn!(labels = self.labels.len(), "No font available, labels not drawn");
            }
            None => {}
        }
        Ok(output)
    }

    fn map(&self, p: Vec2) -> Vec2 {
        let t = &self.transform;
        let (x, y) = (p.x as f32, p.y as f32);
        Vec2::new(
            f64::from(t.sx * x + t.kx * y + t.tx),
            f64::from(t.ky * x + t.sy * y + t.ty),
        )
    }
}

fn paint_for(color: Rgba) -> Paint<'static> {
    let mut paint = Paint::default();
    let [r, g, b, a] = color.0;
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

impl Canvas for RasterCanvas {
    type Image = Pixmap;

    fn clear(&mut self) {
        let [r, g, b, a] = self.background.0;
        self.pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, a));
        self.labels.clear();
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(transform) = self.stack.pop() {
            self.transform = transform;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform = self.transform.pre_translate(offset.x as f32, offset.y as f32);
    }

    fn scale(&mut self, factor: f64) {
        self.transform = self.transform.pre_scale(factor as f32, factor as f32);
    }

    fn draw_image(&mut self, image: &Pixmap, _size: Size) {
        self.pixmap.draw_pixmap(
            0,
            0,
            image.as_ref(),
            &PixmapPaint {
                quality: tiny_skia::FilterQuality::Bicubic,
                ..PixmapPaint::default()
            },
            self.transform,
            None,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, color: Rgba) {
        let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32)
        else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &paint_for(color),
            FillRule::Winding,
            self.transform,
            None,
        );
    }

    fn fill_text(&mut self, text: &str, position: Vec2, size: f64, color: Rgba) {
        let page_size = size * f64::from(self.transform.sx);
        self.labels.push(PendingLabel {
            text: text.to_string(),
            position: self.map(position),
            size: page_size as f32,
            color,
        });
    }
}

/// Convert a decoded photograph into a pixmap the raster canvas can draw.
pub fn pixmap_from_image(image: &DynamicImage) -> Result<Pixmap> {
    let rgba = image.to_rgba8();
    let size = IntSize::from_wh(rgba.width(), rgba.height())
        .ok_or_else(|| GeodotError::Render("image has zero size".into()))?;
    // tiny-skia stores premultiplied colour.
    let mut data = rgba.into_raw();
    for px in data.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a < 255 {
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * a + 127) / 255) as u8;
            }
        }
    }
    Pixmap::from_vec(data, size)
        .ok_or_else(|| GeodotError::Render("cannot build pixmap from image".into()))
}

/// Load the configured font or the first system font that parses.
pub fn load_font(configured: Option<&Path>) -> Option<FontArc> {
    if let Some(path) = configured {
        match std::fs::read(path).map(FontArc::try_from_vec) {
            Ok(Ok(font)) => return Some(font),
            Ok(Err(e)) => warn!(path = %path.display(), error = %e, "Configured font is invalid"),
            Err(e) => warn!(path = %path.display(), error = %e, "Cannot read configured font"),
        }
    }

    let candidates = [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];
    candidates.iter().find_map(|path| {
        let bytes = std::fs::read(path).ok()?;
        FontArc::try_from_vec(bytes).ok()
    })
}

/// Render the annotated photograph onto a print page.
pub fn render_print_image(
    image: &DynamicImage,
    points: &[Point],
    render: &RenderConfig,
    export: &ExportConfig,
) -> Result<RgbaImage> {
    let mut canvas = RasterCanvas::new(export.page_width, export.page_height, Rgba::WHITE)?;
    let source = pixmap_from_image(image)?;
    let image_size = Size::from_pixels(image.width(), image.height());
    let transform = ViewportTransform::fit_to_page(image_size, canvas.size());

    let renderer = CanvasRenderer::new(export.render_style(render));
    renderer.render(&mut canvas, Some((&source, image_size)), points, &transform);

    let font = load_font(export.font_path.as_deref());
    canvas.into_image(font.as_ref())
}

/// Render and save; the format follows the output extension, PNG when absent.
pub fn export_print_image(
    image: &DynamicImage,
    points: &[Point],
    render: &RenderConfig,
    export: &ExportConfig,
    output: &Path,
) -> Result<()> {
    let page = render_print_image(image, points, render, export)?;
    // The page is opaque; RGB keeps JPEG output possible.
    let page = DynamicImage::ImageRgba8(page).to_rgb8();
    let format = image::ImageFormat::from_path(output).unwrap_or(image::ImageFormat::Png);
    page.save_with_format(output, format)?;
    info!(
        path = %output.display(),
        points = points.len(),
        width = export.page_width,
        height = export.page_height,
        "Exported print image"
    );
    Ok(())
}
