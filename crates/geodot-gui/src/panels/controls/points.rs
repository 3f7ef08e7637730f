use crate::app::GeodotApp;
use crate::panels::helpers::section_header;

pub(super) fn points_section(ui: &mut egui::Ui, app: &mut GeodotApp) {
    let count = app.session.store.len().to_string();
    section_header(ui, "Points", Some(&count));

    if app.session.store.is_empty() {
        ui.weak("Left-click the photograph to place a point");
        return;
    }

    let mut delete = None;
    egui::ScrollArea::both()
        .id_salt("point_table")
        .max_height(220.0)
        .show(ui, |ui| {
            egui::Grid::new("points_grid")
                .num_columns(8)
                .striped(true)
                .show(ui, |ui| {
                    for header in ["#", "x", "y", "Name", "Symbol", "Lon", "Lat"] {
                        ui.strong(header);
                    }
                    ui.label("");
                    ui.end_row();

                    for (index, point) in app.session.store.iter().enumerate() {
                        ui.label((index + 1).to_string());
                        ui.monospace(format!("{:.0}", point.x));
                        ui.monospace(format!("{:.0}", point.y));
                        ui.label(&point.name);
                        ui.label(point.symbol.as_deref().unwrap_or("-"));
                        ui.monospace(point.longitude.as_deref().unwrap_or("-"));
                        ui.monospace(point.latitude.as_deref().unwrap_or("-"));
                        let button = ui.small_button("Delete");
                        let button = if point.id.is_none() {
                            button.on_hover_text("Not saved yet")
                        } else {
                            button
                        };
                        if button.clicked() {
                            delete = Some(index);
                        }
                        ui.end_row();
                    }
                });
        });

    if let Some(index) = delete {
        match app.session.delete_point(index) {
            Ok(Some(request)) => app.send_request(request),
            Ok(None) => {}
            Err(e) => app.ui_state.add_log(format!("ERROR: {e}")),
        }
    }
}
