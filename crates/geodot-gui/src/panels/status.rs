use crate::app::GeodotApp;

pub fn show(ctx: &egui::Context, app: &mut GeodotApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        if app.ui_state.is_busy() {
            let detail = match app.ui_state.last_request {
                Some(what) => format!("Waiting to {what}..."),
                None => "Working...".to_string(),
            };
            ui.add(egui::ProgressBar::new(0.0).text(detail).animate(true));
        } else {
            // Same height as the busy bar, keeps the layout still.
            ui.add(egui::ProgressBar::new(0.0).text(""));
        }

        // Log area, fixed height for 4 lines, scrollable.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            if let Some(image) = app.session.image() {
                ui.label(format!("{} ({})", image.name, image.size()));
                ui.separator();
            }
            ui.label(format!("Zoom: {}%", app.session.transform.zoom_percent()));
            ui.separator();
            ui.label(format!("Points: {}", app.session.store.len()));
            if let Some(pointer) = app.session.pointer() {
                let image_pos = app.session.transform.to_image_space(pointer);
                ui.separator();
                ui.monospace(format!("x {:.1}  y {:.1}", image_pos.x, image_pos.y));
            }
            ui.separator();
            ui.label(format!("Server: {}", app.session.config().server.base_url));
        });

        ui.add_space(2.0);
    });
}
