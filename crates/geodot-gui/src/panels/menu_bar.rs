use geodot_core::config::AppConfig;
use geodot_core::error::ValidationError;
use geodot_core::viewport::ZoomDirection;

use crate::app::GeodotApp;
use crate::messages::{WorkerCommand, WorkerResult};

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tif", "tiff", "bmp", "webp"];

pub fn show(ctx: &egui::Context, app: &mut GeodotApp) {
    let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
    let save_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
    let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui
                    .add(egui::Button::new("Open Local Image...").shortcut_text(ctx.format_shortcut(&open_shortcut)))
                    .clicked()
                {
                    ui.close();
                    open_local_image(app);
                }

                if ui.button("Import Catalog...").clicked() {
                    ui.close();
                    import_catalog(app);
                }

                ui.separator();

                if ui.button("Export CSV...").clicked() {
                    ui.close();
                    export_csv(app);
                }

                if ui
                    .add(egui::Button::new("Export Print Image...").shortcut_text(ctx.format_shortcut(&save_shortcut)))
                    .clicked()
                {
                    ui.close();
                    export_image(app);
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(app);
                }

                if ui.button("Export Config...").clicked() {
                    ui.close();
                    export_config(app);
                }

                ui.separator();

                if ui
                    .add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut)))
                    .clicked()
                {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                if ui.button("Zoom In").clicked() {
                    ui.close();
                    app.session.zoom_step(ZoomDirection::In);
                }
                if ui.button("Zoom Out").clicked() {
                    ui.close();
                    app.session.zoom_step(ZoomDirection::Out);
                }
                if ui.button("Fit to Window").clicked() {
                    ui.close();
                    app.session.fit_to_view();
                }
            });

            ui.menu_button("Edit", |ui| {
                if ui.button("Reset Defaults").clicked() {
                    ui.close();
                    app.apply_config(AppConfig::default());
                    app.ui_state.add_log("Config reset to defaults".into());
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&open_shortcut)) {
            open_local_image(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&save_shortcut)) {
            export_image(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&quit_shortcut)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn open_local_image(app: &mut GeodotApp) {
    let Some(cmd_tx) = app.cmd_tx.clone() else {
        return;
    };
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = cmd_tx.send(WorkerCommand::OpenLocalImage { path });
        }
    });
}

pub(crate) fn import_catalog(app: &mut GeodotApp) {
    let Some(cmd_tx) = app.cmd_tx.clone() else {
        return;
    };
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Catalogs", &["csv", "xlsx", "xlsm", "xls"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = cmd_tx.send(WorkerCommand::ImportCatalog { path });
        }
    });
}

fn export_csv(app: &mut GeodotApp) {
    let Some(image) = app.session.image() else {
        app.session.warn(&ValidationError::NoImage);
        return;
    };
    let image_name = image.name.clone();
    let catalog = app.session.catalog().clone();
    let points = app.session.store.points().to_vec();
    let Some(cmd_tx) = app.cmd_tx.clone() else {
        return;
    };

    let stem = file_stem(&image_name);
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV", &["csv"])
            .set_file_name(format!("{stem}_points.csv"))
            .save_file()
        {
            let _ = cmd_tx.send(WorkerCommand::ExportCsv {
                path,
                catalog,
                points,
                image_name,
            });
        }
    });
}

fn export_image(app: &mut GeodotApp) {
    let Some(image) = app.session.image() else {
        app.session.warn(&ValidationError::NoImage);
        return;
    };
    let stem = file_stem(&image.name);
    let image = image.pixels.clone();
    let points = app.session.store.points().to_vec();
    let render = app.session.config().render.clone();
    let export = app.session.config().export.clone();
    let Some(cmd_tx) = app.cmd_tx.clone() else {
        return;
    };

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .add_filter("JPEG", &["jpg", "jpeg"])
            .set_file_name(format!("{stem}_annotated.png"))
            .save_file()
        {
            let _ = cmd_tx.send(WorkerCommand::ExportImage {
                path,
                image,
                points,
                render,
                export,
            });
        }
    });
}

fn import_config(app: &mut GeodotApp) {
    let result_tx = app.result_tx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let result = match AppConfig::load(&path) {
            Ok(config) => WorkerResult::ConfigImported { config },
            Err(e) => WorkerResult::Error {
                message: format!("Config import failed: {e}"),
            },
        };
        let _ = result_tx.send(result);
    });
}

fn export_config(app: &mut GeodotApp) {
    let config = app.session.config().clone();
    let result_tx = app.result_tx.clone();

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .set_file_name("geodot.toml")
            .save_file()
        {
            let result = match config.save(&path) {
                Ok(()) => WorkerResult::Exported { path },
                Err(e) => WorkerResult::Error {
                    message: format!("Config export failed: {e}"),
                },
            };
            let _ = result_tx.send(result);
        }
    });
}

fn file_stem(name: &str) -> String {
    std::path::Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "image".to_string())
}
