mod annotation;
mod building_points;
mod catalog;
mod images;
mod points;
mod settings;

const LEFT_PANEL_WIDTH: f32 = 300.0;

pub fn show(ctx: &egui::Context, app: &mut crate::app::GeodotApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                images::images_section(ui, app);
                ui.separator();
                annotation::annotation_section(ui, app);
                ui.separator();
                points::points_section(ui, app);
                ui.separator();
                building_points::building_points_section(ui, app);
                ui.separator();
                catalog::catalog_section(ui, app);
                ui.separator();
                settings::settings_section(ui, app);
            });
        });
}
