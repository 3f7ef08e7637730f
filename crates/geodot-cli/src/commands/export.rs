use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use geodot_core::catalog::{export_csv, FeatureCatalog};
use geodot_core::config::AppConfig;
use geodot_core::render::export_print_image;
use geodot_core::session::Session;

use super::request;

#[derive(Args)]
pub struct ExportCsvArgs {
    /// Backend image id whose annotations are merged in
    #[arg(long)]
    pub image_id: i64,

    /// Catalog file (.csv or .xlsx); only annotations are written when omitted
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Output CSV path
    #[arg(short, long)]
    pub output: PathBuf,
}

#[derive(Args)]
pub struct ExportImageArgs {
    /// Backend image id
    #[arg(long)]
    pub image_id: i64,

    /// Output image path; the format follows the extension
    #[arg(short, long)]
    pub output: PathBuf,

    /// TrueType font for labels
    #[arg(long)]
    pub font: Option<PathBuf>,
}

/// Open a backend image in a fresh session, as the GUI would.
fn open(config: &AppConfig, image_id: i64) -> Result<Session> {
    let mut session = Session::new(config.clone());
    let response = request(config, session.open_image(image_id))?;
    session.apply(response);
    if session.image().is_none() {
        let notices = session.take_notices();
        let reason = notices
            .last()
            .map(|n| n.message.clone())
            .unwrap_or_else(|| "no image data".to_string());
        anyhow::bail!("Cannot open image {image_id}: {reason}");
    }
    Ok(session)
}

pub fn run_csv(args: &ExportCsvArgs, config: &AppConfig) -> Result<()> {
    let catalog = match &args.catalog {
        Some(path) => FeatureCatalog::import(path)
            .with_context(|| format!("Failed to import catalog {}", path.display()))?,
        None => FeatureCatalog::new(),
    };
    let session = open(config, args.image_id)?;
    let image_name = session.image().map(|i| i.name.clone()).unwrap_or_default();

    export_csv(&args.output, &catalog, session.store.points(), &image_name)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!(
        "Wrote {} catalog rows and {} points to {}",
        catalog.len(),
        session.store.len(),
        args.output.display()
    );
    Ok(())
}

pub fn run_image(args: &ExportImageArgs, config: &AppConfig) -> Result<()> {
    let mut config = config.clone();
    if let Some(font) = &args.font {
        config.export.font_path = Some(font.clone());
    }
    let session = open(&config, args.image_id)?;
    let Some(image) = session.image() else {
        anyhow::bail!("Image {} has no pixels", args.image_id);
    };

    export_print_image(
        &image.pixels,
        session.store.points(),
        &config.render,
        &config.export,
        &args.output,
    )
    .with_context(|| format!("Failed to export {}", args.output.display()))?;
    println!(
        "Exported {} with {} points to {}",
        image.name,
        session.store.len(),
        args.output.display()
    );
    Ok(())
}
