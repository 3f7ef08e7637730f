use std::sync::mpsc;

use geodot_core::api::ApiRequest;
use geodot_core::config::AppConfig;
use geodot_core::session::Session;

use crate::convert::image_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::states::{UIState, ViewportState};
use crate::workers;

pub struct GeodotApp {
    pub cmd_tx: Option<mpsc::Sender<WorkerCommand>>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub session: Session,
    pub ui_state: UIState,
    pub viewport: ViewportState,
    pub show_about: bool,
}

impl GeodotApp {
    pub fn new(ctx: &egui::Context, config: AppConfig) -> Self {
        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = workers::spawn_worker(result_tx.clone(), ctx.clone(), config.server.clone());

        let mut app = Self {
            cmd_tx,
            result_tx,
            result_rx,
            session: Session::new(config),
            ui_state: UIState::default(),
            viewport: ViewportState::default(),
            show_about: false,
        };
        app.ui_state.server_url = app.session.config().server.base_url.clone();
        if app.cmd_tx.is_none() {
            app.ui_state
                .add_log("ERROR: background worker unavailable, backend disabled".into());
        }
        let startup = [
            app.session.refresh_images(),
            app.session.refresh_building_points(),
        ];
        for request in startup {
            app.send_request(request);
        }
        app
    }

    /// Drain all pending results from the worker.
    fn poll_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::Api { request, result } => {
                    self.ui_state.pending_requests = self.ui_state.pending_requests.saturating_sub(1);
                    match result {
                        Ok(response) => {
                            if let Some(next) = self.session.apply(response) {
                                self.send_request(next);
                            }
                        }
                        Err(e) => self.session.fail(&request, &e),
                    }
                }
                WorkerResult::LocalImageLoaded { name, image } => {
                    self.session.open_local_image(name, image);
                }
                WorkerResult::CatalogImported { path, catalog } => {
                    self.ui_state
                        .add_log(format!("Catalog read from {}", path.display()));
                    self.ui_state.selected_catalog_key = None;
                    if let Some(upload) = self.session.set_catalog(catalog) {
                        self.send_request(upload);
                    }
                }
                WorkerResult::ConfigImported { config } => {
                    self.apply_config(config);
                    self.ui_state.add_log("Config imported".into());
                }
                WorkerResult::Exported { path } => {
                    self.ui_state.add_log(format!("Saved: {}", path.display()));
                }
                WorkerResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }

        for notice in self.session.take_notices() {
            self.ui_state.add_notice(notice);
        }
        if let Some(camera) = self.session.take_camera_result() {
            self.ui_state.camera_result = Some(camera);
        }
    }

    /// Re-upload the photograph when the session switched images.
    fn sync_texture(&mut self, ctx: &egui::Context) {
        let generation = self.session.image_generation();
        if generation == self.viewport.generation {
            return;
        }
        self.viewport.generation = generation;
        self.viewport.texture = self.session.image().map(|image| {
            ctx.load_texture(
                "viewport",
                image_to_color_image(&image.pixels),
                egui::TextureOptions::LINEAR,
            )
        });
    }

    pub fn apply_config(&mut self, config: AppConfig) {
        let server_changed = config.server != self.session.config().server;
        let server = config.server.clone();
        self.ui_state.server_url = server.base_url.clone();
        self.session.set_config(config);
        if server_changed {
            self.send_command(WorkerCommand::SetServer(server));
            let refresh = self.session.refresh_images();
            self.send_request(refresh);
        }
    }

    pub fn send_request(&mut self, request: ApiRequest) {
        self.ui_state.pending_requests += 1;
        self.ui_state.last_request = Some(request.describe());
        if !self.send_command(WorkerCommand::Api(request)) {
            self.ui_state.pending_requests -= 1;
        }
    }

    /// Returns `false` when no worker is running.
    pub fn send_command(&mut self, cmd: WorkerCommand) -> bool {
        let sent = self
            .cmd_tx
            .as_ref()
            .is_some_and(|tx| tx.send(cmd).is_ok());
        if !sent {
            self.ui_state
                .add_log("ERROR: background worker unavailable".into());
        }
        sent
    }

    fn show_dialogs(&mut self, ctx: &egui::Context) {
        if self.ui_state.confirm_clear {
            egui::Window::new("Clear all points")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(format!(
                        "Delete all {} points of this image?",
                        self.session.store.len()
                    ));
                    ui.add_space(8.0);
                    ui.horizontal(|ui| {
                        if ui.button("Delete all").clicked() {
                            self.ui_state.confirm_clear = false;
                            match self.session.clear_points() {
                                Ok(Some(request)) => self.send_request(request),
                                Ok(None) => {}
                                Err(e) => self.session.warn(&e),
                            }
                        }
                        if ui.button("Cancel").clicked() {
                            self.ui_state.confirm_clear = false;
                        }
                    });
                });
        }

        if let Some(camera) = self.ui_state.camera_result.clone() {
            egui::Window::new("Camera position")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    let [x, y, z] = camera.camera_position;
                    egui::Grid::new("camera_grid").num_columns(2).show(ui, |ui| {
                        ui.label("X");
                        ui.monospace(format!("{x:.6}"));
                        ui.end_row();
                        ui.label("Y");
                        ui.monospace(format!("{y:.6}"));
                        ui.end_row();
                        ui.label("Z");
                        ui.monospace(format!("{z:.6}"));
                        ui.end_row();
                    });
                    if !camera.message.is_empty() {
                        ui.add_space(4.0);
                        ui.label(&camera.message);
                    }
                    ui.add_space(8.0);
                    if ui.button("Close").clicked() {
                        self.ui_state.camera_result = None;
                    }
                });
        }

        if self.show_about {
            egui::Window::new("About Geodot")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("Geodot");
                        ui.label("Geo-referenced photo annotation");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.show_about = false;
                        }
                    });
                });
        }
    }
}

impl eframe::App for GeodotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results();
        self.sync_texture(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::viewport::show(ctx, self);

        self.show_dialogs(ctx);
    }
}
