use geodot_core::viewport::ZoomDirection;

use crate::app::GeodotApp;
use crate::panels::helpers::section_header;

pub(super) fn annotation_section(ui: &mut egui::Ui, app: &mut GeodotApp) {
    let linked = app
        .session
        .form
        .building_point_id
        .map(|id| format!("building point #{id}"));
    section_header(ui, "Annotation", linked.as_deref());

    let mut edited = false;
    egui::Grid::new("annotation_form")
        .num_columns(2)
        .show(ui, |ui| {
            let form = &mut app.session.form;
            ui.label("Name");
            edited |= ui.text_edit_singleline(&mut form.name).changed();
            ui.end_row();
            ui.label("Symbol");
            edited |= ui.text_edit_singleline(&mut form.symbol).changed();
            ui.end_row();
            ui.label("Longitude");
            edited |= ui.text_edit_singleline(&mut form.longitude).changed();
            ui.end_row();
            ui.label("Latitude");
            edited |= ui.text_edit_singleline(&mut form.latitude).changed();
            ui.end_row();
        });
    // Hand edits no longer describe the selected building point.
    if edited {
        app.session.form.unlink();
    }

    ui.horizontal(|ui| {
        if ui.button("Save points").clicked() {
            match app.session.save_points() {
                Ok(request) => app.send_request(request),
                Err(e) => app.session.warn(&e),
            }
        }
        if ui.button("Save as building point").clicked() {
            match app.session.save_building_point() {
                Ok(request) => app.send_request(request),
                Err(e) => app.session.warn(&e),
            }
        }
    });

    ui.horizontal(|ui| {
        if ui.button("Clear form").clicked() {
            app.session.form.clear();
        }
        let has_points = !app.session.store.is_empty();
        if ui
            .add_enabled(has_points, egui::Button::new("Clear all points"))
            .clicked()
        {
            app.ui_state.confirm_clear = true;
        }
        if ui.button("Camera").on_hover_text("Estimate the camera position").clicked() {
            match app.session.calculate_camera() {
                Ok(request) => app.send_request(request),
                Err(e) => app.session.warn(&e),
            }
        }
    });

    ui.add_space(4.0);
    let enabled = app.session.image().is_some();
    ui.add_enabled_ui(enabled, |ui| {
        ui.horizontal(|ui| {
            let mut percent = app.session.transform.zoom_percent();
            if ui
                .add(egui::Slider::new(&mut percent, 10..=300).text("Zoom %"))
                .changed()
            {
                app.session.set_zoom_percent(percent);
            }
        });
        ui.horizontal(|ui| {
            if ui.button("−").clicked() {
                app.session.zoom_step(ZoomDirection::Out);
            }
            if ui.button("+").clicked() {
                app.session.zoom_step(ZoomDirection::In);
            }
            if ui.button("Fit").clicked() {
                app.session.fit_to_view();
            }
        });
    });
}
