use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use geodot_core::catalog::FeatureCatalog;
use geodot_core::config::AppConfig;
use geodot_core::session::Session;

use super::request;
use crate::summary::{print_catalog, print_notices};

#[derive(Args)]
pub struct ImportCatalogArgs {
    /// Catalog file (.csv or .xlsx)
    pub file: PathBuf,

    /// Do not upload the entries as building points
    #[arg(long)]
    pub no_upload: bool,

    /// Print every imported row
    #[arg(long)]
    pub list: bool,
}

pub fn run(args: &ImportCatalogArgs, config: &AppConfig) -> Result<()> {
    let catalog = FeatureCatalog::import(&args.file)
        .with_context(|| format!("Failed to import catalog {}", args.file.display()))?;

    let mut config = config.clone();
    if args.no_upload {
        config.catalog.upload_on_import = false;
    }
    let mut session = Session::new(config);
    let mut next = session.set_catalog(catalog);
    while let Some(req) = next.take() {
        let response = request(session.config(), req)?;
        next = session.apply(response);
    }

    if args.list {
        print_catalog(session.catalog());
    }
    print_notices(&session.take_notices());
    Ok(())
}
