use crate::app::GeodotApp;
use crate::panels::helpers::section_header;
use crate::panels::menu_bar;

pub(super) fn catalog_section(ui: &mut egui::Ui, app: &mut GeodotApp) {
    let catalog = app.session.catalog();
    let status = (!catalog.is_empty()).then(|| format!("{} entries", catalog.len()));
    section_header(ui, "Catalog", status.as_deref());

    ui.horizontal(|ui| {
        if ui.button("Import...").clicked() {
            menu_bar::import_catalog(app);
        }
        ui.add(
            egui::TextEdit::singleline(&mut app.ui_state.catalog_filter)
                .hint_text("Filter")
                .desired_width(140.0),
        );
    });

    if app.session.catalog().is_empty() {
        return;
    }

    let filter = app.ui_state.catalog_filter.trim().to_lowercase();
    let mut chosen = None;
    egui::ScrollArea::vertical()
        .id_salt("catalog_list")
        .max_height(200.0)
        .show(ui, |ui| {
            for entry in app.session.catalog().iter() {
                let key = entry.key();
                if !filter.is_empty() && !key.to_lowercase().contains(&filter) {
                    continue;
                }
                let selected = app.ui_state.selected_catalog_key.as_deref() == Some(key.as_str());
                let located = entry.longitude.is_some() && entry.latitude.is_some();
                let text = if located { key.clone() } else { format!("{key} (no location)") };
                if ui.selectable_label(selected, text).clicked() {
                    chosen = Some(key);
                }
            }
        });

    if let Some(key) = chosen {
        match app.session.select_catalog_entry(&key) {
            Ok(()) => app.ui_state.selected_catalog_key = Some(key),
            Err(e) => app.ui_state.add_log(format!("ERROR: {e}")),
        }
    }
}
