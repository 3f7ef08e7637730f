use crate::app::GeodotApp;
use crate::panels::helpers::section_header;

pub(super) fn building_points_section(ui: &mut egui::Ui, app: &mut GeodotApp) {
    let count = app.session.building_points().len().to_string();
    section_header(ui, "Building points", Some(&count));

    let selected_id = app.session.form.building_point_id;
    let selected_text = selected_id
        .and_then(|id| app.session.building_points().iter().find(|p| p.id == id))
        .map(|p| p.name.clone())
        .unwrap_or_else(|| "Select...".to_string());

    let mut chosen = None;
    ui.horizontal(|ui| {
        egui::ComboBox::from_id_salt("building_point_combo")
            .selected_text(selected_text)
            .show_ui(ui, |ui| {
                for point in app.session.building_points() {
                    if ui
                        .selectable_label(selected_id == Some(point.id), point.to_string())
                        .clicked()
                    {
                        chosen = Some(point.id);
                    }
                }
            });
        if ui.button("Refresh").clicked() {
            let request = app.session.refresh_building_points();
            app.send_request(request);
        }
    });

    if let Some(id) = chosen {
        if let Err(e) = app.session.select_building_point(id) {
            app.ui_state.add_log(format!("ERROR: {e}"));
        }
    }
}
