use approx::assert_relative_eq;

use geodot_core::config::{ViewportConfig, ZoomMode};
use geodot_core::geometry::{Size, Vec2};
use geodot_core::viewport::{ViewportTransform, ZoomDirection};

// ---------------------------------------------------------------------------
// Fit
// ---------------------------------------------------------------------------

#[test]
fn test_fit_halves_large_image() {
    let t = ViewportTransform::fit_to_container(Size::new(800.0, 600.0), Size::new(400.0, 300.0));
    assert_relative_eq!(t.scale, 0.5);
    assert_relative_eq!(t.offset.x, 0.0);
    assert_relative_eq!(t.offset.y, 0.0);
}

#[test]
fn test_fit_never_upscales() {
    let t = ViewportTransform::fit_to_container(Size::new(200.0, 100.0), Size::new(1000.0, 1000.0));
    assert_relative_eq!(t.scale, 1.0);
    assert_relative_eq!(t.offset.x, 400.0);
    assert_relative_eq!(t.offset.y, 450.0);
}

#[test]
fn test_fit_scale_bounded_for_many_shapes() {
    let shapes = [(10.0, 10.0), (4000.0, 300.0), (300.0, 4000.0), (1.0, 1.0), (640.0, 480.0)];
    for (w, h) in shapes {
        let t = ViewportTransform::fit_to_container(Size::new(w, h), Size::new(800.0, 600.0));
        assert!(t.scale <= 1.0, "{w}x{h} gave {}", t.scale);
        assert!(t.scale > 0.0);
    }
}

#[test]
fn test_fit_centres_letterboxed_image() {
    let t = ViewportTransform::fit_to_container(Size::new(1000.0, 500.0), Size::new(500.0, 500.0));
    assert_relative_eq!(t.scale, 0.5);
    assert_relative_eq!(t.offset.x, 0.0);
    assert_relative_eq!(t.offset.y, 125.0);
}

#[test]
fn test_fit_empty_input_is_identity() {
    let t = ViewportTransform::fit_to_container(Size::new(0.0, 0.0), Size::new(400.0, 300.0));
    assert_eq!(t, ViewportTransform::default());
}

#[test]
fn test_fit_to_page_may_upscale() {
    let t = ViewportTransform::fit_to_page(Size::new(100.0, 100.0), Size::new(2480.0, 3508.0));
    assert_relative_eq!(t.scale, 24.8, epsilon = 1e-9);
    assert_relative_eq!(t.offset.x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(t.offset.y, (3508.0 - 2480.0) / 2.0, epsilon = 1e-9);
}

// ---------------------------------------------------------------------------
// Coordinate mapping
// ---------------------------------------------------------------------------

#[test]
fn test_canvas_to_image_at_half_scale() {
    let t = ViewportTransform::new(0.5, Vec2::ZERO);
    let p = t.to_image_space(Vec2::new(100.0, 100.0));
    assert_relative_eq!(p.x, 200.0);
    assert_relative_eq!(p.y, 200.0);
}

#[test]
fn test_round_trip_is_identity() {
    let transforms = [
        ViewportTransform::new(0.1, Vec2::new(-50.0, 12.5)),
        ViewportTransform::new(1.0, Vec2::ZERO),
        ViewportTransform::new(2.75, Vec2::new(300.0, -999.0)),
    ];
    let points = [Vec2::new(0.0, 0.0), Vec2::new(123.4, 567.8), Vec2::new(-10.0, 3.3)];
    for t in transforms {
        for p in points {
            let back = t.to_image_space(t.to_canvas_space(p));
            assert_relative_eq!(back.x, p.x, epsilon = 1e-9);
            assert_relative_eq!(back.y, p.y, epsilon = 1e-9);
        }
    }
}

// ---------------------------------------------------------------------------
// Zoom
// ---------------------------------------------------------------------------

#[test]
fn test_zoom_keeps_focal_point_fixed() {
    let mut t = ViewportTransform::new(0.8, Vec2::new(20.0, 40.0));
    let focal = Vec2::new(310.0, 145.0);
    let before = t.to_image_space(focal);
    t.zoom(focal, ZoomDirection::In);
    let after = t.to_image_space(focal);
    assert_relative_eq!(before.x, after.x, epsilon = 1e-9);
    assert_relative_eq!(before.y, after.y, epsilon = 1e-9);
    assert_relative_eq!(t.scale, 0.8 * 0.1f64.exp(), epsilon = 1e-12);
}

#[test]
fn test_zoom_focal_fixed_even_when_clamped() {
    let mut t = ViewportTransform::new(2.95, Vec2::new(-100.0, -40.0));
    let focal = Vec2::new(50.0, 60.0);
    let before = t.to_image_space(focal);
    t.zoom(focal, ZoomDirection::In);
    assert_relative_eq!(t.scale, 3.0);
    let after = t.to_image_space(focal);
    assert_relative_eq!(before.x, after.x, epsilon = 1e-9);
    assert_relative_eq!(before.y, after.y, epsilon = 1e-9);
}

#[test]
fn test_scale_stays_clamped_over_long_sequences() {
    let mut t = ViewportTransform::default();
    let focal = Vec2::new(10.0, 10.0);
    for i in 0..200 {
        let direction = if (i / 37) % 2 == 0 { ZoomDirection::In } else { ZoomDirection::Out };
        t.zoom(focal, direction);
        assert!((0.1..=3.0).contains(&t.scale), "step {i}: {}", t.scale);
    }
    for _ in 0..100 {
        t.zoom(focal, ZoomDirection::Out);
    }
    assert_relative_eq!(t.scale, 0.1);
}

#[test]
fn test_ratio_mode_uses_fixed_step() {
    let config = ViewportConfig {
        zoom_mode: ZoomMode::Ratio,
        ..Default::default()
    };
    let mut t = ViewportTransform::default();
    t.zoom_with(Vec2::ZERO, ZoomDirection::In, &config);
    assert_relative_eq!(t.scale, 1.1);
    t.zoom_with(Vec2::ZERO, ZoomDirection::Out, &config);
    assert_relative_eq!(t.scale, 1.0, epsilon = 1e-12);
}

#[test]
fn test_wheel_delta_direction() {
    assert_eq!(ZoomDirection::from_wheel_delta(-120.0), Some(ZoomDirection::In));
    assert_eq!(ZoomDirection::from_wheel_delta(3.0), Some(ZoomDirection::Out));
    assert_eq!(ZoomDirection::from_wheel_delta(0.0), None);
}

#[test]
fn test_set_scale_around_clamps_and_keeps_focal() {
    let config = ViewportConfig::default();
    let mut t = ViewportTransform::new(1.0, Vec2::new(5.0, 5.0));
    let focal = Vec2::new(200.0, 150.0);
    let before = t.to_image_space(focal);
    t.set_scale_around(focal, 9.0, &config);
    assert_relative_eq!(t.scale, 3.0);
    let after = t.to_image_space(focal);
    assert_relative_eq!(before.x, after.x, epsilon = 1e-9);
    assert_relative_eq!(before.y, after.y, epsilon = 1e-9);
    assert_eq!(t.zoom_percent(), 300);
}

// ---------------------------------------------------------------------------
// Pan
// ---------------------------------------------------------------------------

#[test]
fn test_pan_is_unclamped() {
    let mut t = ViewportTransform::default();
    t.pan(-5000.0, 12.0);
    t.pan(1.0, 1.0);
    assert_relative_eq!(t.offset.x, -4999.0);
    assert_relative_eq!(t.offset.y, 13.0);
    assert_relative_eq!(t.scale, 1.0);
}
