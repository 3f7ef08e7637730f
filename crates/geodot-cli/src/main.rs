mod commands;
mod summary;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "geodot", about = "Geo-referenced photo annotation tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML config file (defaults are used when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overriding the config
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List images stored on the backend
    Images(commands::images::ImagesArgs),
    /// Delete an image and its annotations
    DeleteImage(commands::images::DeleteImageArgs),
    /// List the annotations of an image
    Features(commands::features::FeaturesArgs),
    /// Remove every annotation of an image
    Clear(commands::features::ClearArgs),
    /// Manage stored building points
    #[command(subcommand)]
    BuildingPoints(commands::building_points::BuildingPointsCommand),
    /// Import a feature-point catalog from CSV or XLSX
    ImportCatalog(commands::catalog::ImportCatalogArgs),
    /// Write a catalog merged with an image's annotation pixels
    ExportCsv(commands::export::ExportCsvArgs),
    /// Render an annotated print page for an image
    ExportImage(commands::export::ExportImageArgs),
    /// Ask the backend for an image's camera position
    Camera(commands::camera::CameraArgs),
    /// Print or save the default configuration
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = || commands::load_config(cli.config.as_deref(), cli.server.as_deref());

    match &cli.command {
        Commands::Images(args) => commands::images::run(args, &config()?),
        Commands::DeleteImage(args) => commands::images::delete(args, &config()?),
        Commands::Features(args) => commands::features::run(args, &config()?),
        Commands::Clear(args) => commands::features::clear(args, &config()?),
        Commands::BuildingPoints(cmd) => commands::building_points::run(cmd, &config()?),
        Commands::ImportCatalog(args) => commands::catalog::run(args, &config()?),
        Commands::ExportCsv(args) => commands::export::run_csv(args, &config()?),
        Commands::ExportImage(args) => commands::export::run_image(args, &config()?),
        Commands::Camera(args) => commands::camera::run(args, &config()?),
        Commands::Config(args) => commands::config::run(args, cli.config.as_deref()),
    }
}
