use std::path::Path;
use std::sync::mpsc;

use geodot_core::annotation::Point;
use geodot_core::catalog::{export_csv, FeatureCatalog};
use geodot_core::config::{ExportConfig, RenderConfig};
use geodot_core::render::export_print_image;
use image::DynamicImage;

use crate::messages::WorkerResult;

use super::{send, send_error, send_log};

pub(super) fn handle_open_local_image(
    path: &Path,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    send_log(tx, ctx, format!("Loading {}...", path.display()));
    match image::open(path) {
        Ok(image) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            send(tx, ctx, WorkerResult::LocalImageLoaded { name, image });
        }
        Err(e) => send_error(tx, ctx, format!("Failed to open {}: {e}", path.display())),
    }
}

pub(super) fn handle_import_catalog(
    path: &Path,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match FeatureCatalog::import(path) {
        Ok(catalog) => send(
            tx,
            ctx,
            WorkerResult::CatalogImported {
                path: path.to_path_buf(),
                catalog,
            },
        ),
        Err(e) => send_error(tx, ctx, format!("Catalog import failed: {e}")),
    }
}

pub(super) fn handle_export_csv(
    path: &Path,
    catalog: &FeatureCatalog,
    points: &[Point],
    image_name: &str,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    match export_csv(path, catalog, points, image_name) {
        Ok(()) => send(
            tx,
            ctx,
            WorkerResult::Exported {
                path: path.to_path_buf(),
            },
        ),
        Err(e) => send_error(tx, ctx, format!("CSV export failed: {e}")),
    }
}

#[allow(clippy::too_many_arguments)]
pub(super) fn handle_export_image(
    path: &Path,
    image: &DynamicImage,
    points: &[Point],
    render: &RenderConfig,
    export: &ExportConfig,
    tx: &mpsc::Sender<WorkerResult>,
    ctx: &egui::Context,
) {
    send_log(tx, ctx, "Rendering print page...");
    match export_print_image(image, points, render, export, path) {
        Ok(()) => send(
            tx,
            ctx,
            WorkerResult::Exported {
                path: path.to_path_buf(),
            },
        ),
        Err(e) => send_error(tx, ctx, format!("Image export failed: {e}")),
    }
}
