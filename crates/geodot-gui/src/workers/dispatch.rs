use std::sync::mpsc;

use geodot_core::api::HttpBackend;
use geodot_core::config::ServerConfig;

use crate::messages::{WorkerCommand, WorkerResult};

use super::{api, files};

/// Spawn the worker thread. Returns the command sender, or `None` when the
/// thread could not be started.
pub fn spawn_worker(
    result_tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    server: ServerConfig,
) -> Option<mpsc::Sender<WorkerCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<WorkerCommand>();

    let spawned = std::thread::Builder::new()
        .name("geodot-worker".into())
        .spawn(move || {
            worker_loop(cmd_rx, result_tx, ctx, server);
        });

    match spawned {
        Ok(_) => Some(cmd_tx),
        Err(e) => {
            tracing::error!(error = %e, "Failed to spawn worker thread");
            None
        }
    }
}

pub(crate) fn send(tx: &mpsc::Sender<WorkerResult>, ctx: &egui::Context, result: WorkerResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

pub(crate) fn send_log(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Log {
            message: msg.into(),
        },
    );
}

pub(crate) fn send_error(
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
    msg: impl Into<String>,
) {
    send(
        tx,
        ctx,
        WorkerResult::Error {
            message: msg.into(),
        },
    );
}

/// Commands run strictly in arrival order, so at most one backend request is
/// in flight at a time.
fn worker_loop(
    cmd_rx: mpsc::Receiver<WorkerCommand>,
    tx: mpsc::Sender<WorkerResult>,
    ctx: egui::Context,
    server: ServerConfig,
) {
    let mut backend = HttpBackend::new(&server);

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            WorkerCommand::Api(request) => {
                api::handle_request(&backend, request, &tx, &ctx);
            }
            WorkerCommand::SetServer(server) => {
                backend = HttpBackend::new(&server);
                send_log(&tx, &ctx, format!("Server set to {}", backend.base_url()));
            }
            WorkerCommand::OpenLocalImage { path } => {
                files::handle_open_local_image(&path, &tx, &ctx);
            }
            WorkerCommand::ImportCatalog { path } => {
                files::handle_import_catalog(&path, &tx, &ctx);
            }
            WorkerCommand::ExportCsv {
                path,
                catalog,
                points,
                image_name,
            } => {
                files::handle_export_csv(&path, &catalog, &points, &image_name, &tx, &ctx);
            }
            WorkerCommand::ExportImage {
                path,
                image,
                points,
                render,
                export,
            } => {
                files::handle_export_image(&path, &image, &points, &render, &export, &tx, &ctx);
            }
        }
    }
}
