mod common;

use approx::assert_relative_eq;

use geodot_core::config::{ExportConfig, RenderConfig};
use geodot_core::geometry::{Size, Vec2};
use geodot_core::render::{export_print_image, render_print_image, CanvasRenderer, Rgba};
use geodot_core::viewport::ViewportTransform;

use common::{point_at, solid_image, Op, RecordingCanvas};

// ---------------------------------------------------------------------------
// Draw order
// ---------------------------------------------------------------------------

#[test]
fn test_no_image_only_clears() {
    let mut canvas = RecordingCanvas::default();
    CanvasRenderer::default().render(
        &mut canvas,
        None,
        &[point_at(1.0, 1.0, "a")],
        &ViewportTransform::default(),
    );
    assert_eq!(canvas.ops, vec![Op::Clear]);
}

#[test]
fn test_translate_before_scale() {
    let mut canvas = RecordingCanvas::default();
    let transform = ViewportTransform::new(2.0, Vec2::new(10.0, 20.0));
    let size = Size::new(64.0, 48.0);
    CanvasRenderer::default().render(&mut canvas, Some((&(), size)), &[], &transform);
    assert_eq!(
        canvas.ops,
        vec![
            Op::Clear,
            Op::Save,
            Op::Translate(Vec2::new(10.0, 20.0)),
            Op::Scale(2.0),
            Op::DrawImage(size),
            Op::Restore,
        ]
    );
}

#[test]
fn test_markers_keep_constant_screen_size() {
    let style = RenderConfig::default();
    let renderer = CanvasRenderer::new(style.clone());
    for scale in [0.25, 1.0, 2.5] {
        let mut canvas = RecordingCanvas::default();
        let transform = ViewportTransform::new(scale, Vec2::ZERO);
        renderer.render(
            &mut canvas,
            Some((&(), Size::new(10.0, 10.0))),
            &[point_at(4.0, 6.0, "Gate")],
            &transform,
        );
        let circle = canvas
            .ops
            .iter()
            .find_map(|op| match op {
                Op::Circle { center, radius, color } => Some((*center, *radius, *color)),
                _ => None,
            })
            .unwrap();
        assert_eq!(circle.0, Vec2::new(4.0, 6.0));
        assert_relative_eq!(circle.1 * scale, style.marker_radius, epsilon = 1e-12);
        assert_eq!(circle.2, Rgba(style.marker_color));

        let (text, position, size) = canvas
            .ops
            .iter()
            .find_map(|op| match op {
                Op::Text { text, position, size, .. } => Some((text.clone(), *position, *size)),
                _ => None,
            })
            .unwrap();
        assert_eq!(text, "Gate");
        assert_relative_eq!(size * scale, style.label_size, epsilon = 1e-12);
        assert_relative_eq!((position.x - 4.0) * scale, style.label_offset, epsilon = 1e-12);
        assert_relative_eq!((position.y - 6.0) * scale, style.label_offset, epsilon = 1e-12);
    }
}

#[test]
fn test_label_prefers_symbol() {
    let mut point = point_at(0.0, 0.0, "Bell tower");
    point.symbol = Some("B7".into());
    let mut canvas = RecordingCanvas::default();
    CanvasRenderer::default().render(
        &mut canvas,
        Some((&(), Size::new(1.0, 1.0))),
        &[point],
        &ViewportTransform::default(),
    );
    assert!(canvas
        .ops
        .iter()
        .any(|op| matches!(op, Op::Text { text, .. } if text == "B7")));
}

#[test]
fn test_points_drawn_in_order() {
    let points = [point_at(0.0, 0.0, "a"), point_at(1.0, 0.0, "b"), point_at(2.0, 0.0, "c")];
    let mut canvas = RecordingCanvas::default();
    CanvasRenderer::default().render(
        &mut canvas,
        Some((&(), Size::new(1.0, 1.0))),
        &points,
        &ViewportTransform::default(),
    );
    let labels: Vec<&str> = canvas
        .ops
        .iter()
        .filter_map(|op| match op {
            Op::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(labels, ["a", "b", "c"]);
    assert_eq!(canvas.ops.last(), Some(&Op::Restore));
}

// ---------------------------------------------------------------------------
// Print export
// ---------------------------------------------------------------------------

fn small_page() -> ExportConfig {
    ExportConfig {
        page_width: 200,
        page_height: 300,
        marker_radius: 6.0,
        label_size: 12.0,
        font_path: None,
    }
}

#[test]
fn test_print_page_size_and_background() {
    let image = solid_image(100, 50, [0, 0, 255, 255]);
    let page = render_print_image(&image, &[], &RenderConfig::default(), &small_page()).unwrap();
    assert_eq!(page.dimensions(), (200, 300));
    // 100x50 fits as 200x100, centred vertically: rows 100..200.
    assert_eq!(page.get_pixel(5, 5).0, [255, 255, 255, 255]);
    assert_eq!(page.get_pixel(100, 150).0, [0, 0, 255, 255]);
    assert_eq!(page.get_pixel(100, 295).0, [255, 255, 255, 255]);
}

#[test]
fn test_print_burns_in_markers() {
    let image = solid_image(100, 50, [0, 0, 255, 255]);
    let points = [point_at(50.0, 25.0, "")];
    let page = render_print_image(&image, &points, &RenderConfig::default(), &small_page()).unwrap();
    // Image centre maps to page (100, 150).
    let [r, g, b, _] = page.get_pixel(100, 150).0;
    assert!(r > 200 && g < 50 && b < 50, "marker not red: {r},{g},{b}");
}

#[test]
fn test_export_writes_png_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("page.png");
    let image = solid_image(40, 40, [90, 90, 90, 255]);
    export_print_image(
        &image,
        &[point_at(20.0, 20.0, "x")],
        &RenderConfig::default(),
        &small_page(),
        &path,
    )
    .unwrap();
    let written = image::open(&path).unwrap();
    assert_eq!((written.width(), written.height()), (200, 300));
}
