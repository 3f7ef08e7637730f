use geodot_core::geometry::{Size, Vec2};
use geodot_core::input::{CursorHint, InputEffect, InputEvent, PointerButton};
use geodot_core::render::CanvasRenderer;

use crate::app::GeodotApp;
use crate::canvas::EguiCanvas;
use crate::states::ViewportState;

pub fn show(ctx: &egui::Context, app: &mut GeodotApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        app.session
            .set_container(Size::new(rect.width() as f64, rect.height() as f64));

        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        let events = collect_events(ui, &response, rect, &mut app.viewport);

        let mut cursor = CursorHint::Crosshair;
        for event in &events {
            for effect in app.session.handle_input(event) {
                match effect {
                    InputEffect::Cursor(hint) => cursor = hint,
                    InputEffect::PointAdded { index } => {
                        tracing::debug!(index, "Point added");
                    }
                    _ => {}
                }
            }
        }
        if app.session.is_panning() {
            cursor = CursorHint::Grabbing;
        }
        if response.hovered() || app.session.is_panning() {
            ctx.set_cursor_icon(match cursor {
                CursorHint::Crosshair => egui::CursorIcon::Crosshair,
                CursorHint::Grabbing => egui::CursorIcon::Grabbing,
            });
        }

        let mut canvas = EguiCanvas::new(ui.painter(), rect, egui::Color32::from_gray(30));
        let renderer = CanvasRenderer::new(app.session.config().render.clone());
        let texture = app.viewport.texture.as_ref().map(|t| t.id());
        match (texture, app.session.image()) {
            (Some(texture_id), Some(image)) => renderer.render(
                &mut canvas,
                Some((&texture_id, image.size())),
                app.session.store.points(),
                &app.session.transform,
            ),
            _ => {
                renderer.render(&mut canvas, None, &[], &app.session.transform);
                show_placeholder(ui, rect);
            }
        }
    });
}

/// Translate this frame's egui pointer state into canvas-space input events.
fn collect_events(
    ui: &egui::Ui,
    response: &egui::Response,
    rect: egui::Rect,
    state: &mut ViewportState,
) -> Vec<InputEvent> {
    let last_pointer = &mut state.last_pointer;
    let to_canvas = |p: egui::Pos2| Vec2::new((p.x - rect.min.x) as f64, (p.y - rect.min.y) as f64);
    let mut events = Vec::new();

    let (latest, press_origin, scroll_y) = ui.input(|i| {
        (
            i.pointer.latest_pos(),
            i.pointer.press_origin(),
            i.raw_scroll_delta.y,
        )
    });
    let inside = latest.filter(|p| rect.contains(*p));

    if response.drag_started_by(egui::PointerButton::Secondary) {
        if let Some(origin) = press_origin.or(inside) {
            events.push(InputEvent::PointerDown {
                button: PointerButton::Secondary,
                pos: to_canvas(origin),
            });
        }
    }

    match inside {
        Some(pos) if *last_pointer != Some(pos) => {
            events.push(InputEvent::PointerMove { pos: to_canvas(pos) });
        }
        None if last_pointer.is_some() => {
            events.push(InputEvent::PointerLeave);
            state.wheel.reset();
        }
        _ => {}
    }
    *last_pointer = inside;

    if response.drag_stopped_by(egui::PointerButton::Secondary) {
        let pos = inside.or(latest).map(to_canvas).unwrap_or_default();
        events.push(InputEvent::PointerUp {
            button: PointerButton::Secondary,
            pos,
        });
    }

    if response.clicked_by(egui::PointerButton::Primary) {
        if let Some(pos) = response.interact_pointer_pos() {
            let pos = to_canvas(pos);
            events.push(InputEvent::PointerDown {
                button: PointerButton::Primary,
                pos,
            });
            events.push(InputEvent::PointerUp {
                button: PointerButton::Primary,
                pos,
            });
        }
    }

    if response.secondary_clicked() {
        events.push(InputEvent::ContextMenu);
    }

    // egui scrolls up with positive y; wheel events use the browser sign.
    // Smooth scrolling arrives in small pieces, one event per whole notch.
    if scroll_y != 0.0 && response.hovered() {
        if let Some(pos) = inside {
            let notches = state.wheel.feed(-(scroll_y as f64));
            let delta_y = f64::from(notches.signum());
            for _ in 0..notches.unsigned_abs() {
                events.push(InputEvent::Wheel {
                    pos: to_canvas(pos),
                    delta_y,
                });
            }
        }
    }

    events
}

fn show_placeholder(ui: &mut egui::Ui, rect: egui::Rect) {
    ui.scope_builder(egui::UiBuilder::new().max_rect(rect), |ui| {
        ui.centered_and_justified(|ui| {
            ui.label(
                egui::RichText::new("Open an image to begin annotating")
                    .size(18.0)
                    .color(egui::Color32::from_gray(100)),
            );
        });
    });
}
