use geodot_core::geometry::{Size, Vec2};
use geodot_core::render::{Canvas, Rgba};

/// Current mapping from canvas units to screen points: `screen = p * scale + origin`.
#[derive(Clone, Copy)]
struct Affine {
    scale: f32,
    origin: egui::Vec2,
}

impl Affine {
    fn map(&self, p: Vec2) -> egui::Pos2 {
        egui::pos2(p.x as f32, p.y as f32) * self.scale + self.origin
    }
}

/// Draws through an egui painter clipped to the viewport rect.
pub struct EguiCanvas<'a> {
    painter: &'a egui::Painter,
    rect: egui::Rect,
    background: egui::Color32,
    current: Affine,
    stack: Vec<Affine>,
}

impl<'a> EguiCanvas<'a> {
    pub fn new(painter: &'a egui::Painter, rect: egui::Rect, background: egui::Color32) -> Self {
        Self {
            painter,
            rect,
            background,
            current: Affine {
                scale: 1.0,
                origin: rect.min.to_vec2(),
            },
            stack: Vec::new(),
        }
    }
}

fn color(c: Rgba) -> egui::Color32 {
    let [r, g, b, a] = c.0;
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

impl Canvas for EguiCanvas<'_> {
    type Image = egui::TextureId;

    fn clear(&mut self) {
        self.painter.rect_filled(self.rect, 0.0, self.background);
    }

    fn save(&mut self) {
        self.stack.push(self.current);
    }

    fn restore(&mut self) {
        if let Some(previous) = self.stack.pop() {
            self.current = previous;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.current.origin += egui::vec2(offset.x as f32, offset.y as f32) * self.current.scale;
    }

    fn scale(&mut self, factor: f64) {
        self.current.scale *= factor as f32;
    }

    fn draw_image(&mut self, image: &Self::Image, size: Size) {
        let rect = egui::Rect::from_min_max(
            self.current.map(Vec2::ZERO),
            self.current.map(Vec2::new(size.width, size.height)),
        );
        self.painter.image(
            *image,
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f64, fill: Rgba) {
        self.painter.circle_filled(
            self.current.map(center),
            radius as f32 * self.current.scale,
            color(fill),
        );
    }

    fn fill_text(&mut self, text: &str, position: Vec2, size: f64, fill: Rgba) {
        self.painter.text(
            self.current.map(position),
            egui::Align2::LEFT_BOTTOM,
            text,
            egui::FontId::proportional(size as f32 * self.current.scale),
            color(fill),
        );
    }
}
