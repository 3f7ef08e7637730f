use geodot_core::config::ZoomMode;

use crate::app::GeodotApp;
use crate::panels::helpers::{enum_combo, section_header};

pub(super) fn settings_section(ui: &mut egui::Ui, app: &mut GeodotApp) {
    section_header(ui, "Settings", None);

    let mut config = app.session.config().clone();
    let mut changed = false;

    changed |= enum_combo(
        ui,
        "Wheel zoom",
        &mut config.viewport.zoom_mode,
        &[ZoomMode::Exponential, ZoomMode::Ratio],
    );
    changed |= ui
        .checkbox(&mut config.annotation.require_symbol, "Require symbol")
        .changed();
    changed |= ui
        .checkbox(&mut config.catalog.upload_on_import, "Upload catalog on import")
        .changed();

    ui.horizontal(|ui| {
        ui.label("Server");
        let edit = ui.text_edit_singleline(&mut app.ui_state.server_url);
        if edit.lost_focus() && app.ui_state.server_url.trim() != config.server.base_url {
            config.server.base_url = app.ui_state.server_url.trim().to_string();
            changed = true;
        }
    });

    if changed && config != *app.session.config() {
        app.apply_config(config);
    }
}
