use crate::app::GeodotApp;
use crate::panels::helpers::section_header;

pub(super) fn images_section(ui: &mut egui::Ui, app: &mut GeodotApp) {
    let count = app.session.images().len().to_string();
    section_header(ui, "Images", Some(&count));

    if ui.button("Refresh").clicked() {
        let request = app.session.refresh_images();
        app.send_request(request);
    }

    let current = app.session.image_id();
    let mut open = None;
    egui::ScrollArea::vertical()
        .id_salt("image_list")
        .max_height(160.0)
        .show(ui, |ui| {
            for image in app.session.images() {
                let selected = current == Some(image.id);
                if ui
                    .selectable_label(selected, format!("#{} {}", image.id, image.name))
                    .clicked()
                    && !selected
                {
                    open = Some(image.id);
                }
            }
        });

    if let Some(id) = open {
        let request = app.session.open_image(id);
        app.send_request(request);
    }
}
