use anyhow::Result;
use clap::Args;
use geodot_core::api::{ApiRequest, ApiResponse};
use geodot_core::config::AppConfig;
use geodot_core::session::point_from_feature;

use super::{confirm, request};
use crate::summary::print_points;

#[derive(Args)]
pub struct FeaturesArgs {
    /// Backend image id
    pub image_id: i64,
}

#[derive(Args)]
pub struct ClearArgs {
    /// Backend image id
    pub image_id: i64,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

pub fn run(args: &FeaturesArgs, config: &AppConfig) -> Result<()> {
    let ApiResponse::Features { features, .. } = request(
        config,
        ApiRequest::ListFeatures {
            image_id: args.image_id,
        },
    )?
    else {
        anyhow::bail!("Unexpected response to annotation listing");
    };
    let fallback = &config.annotation.default_point_name;
    let points: Vec<_> = features
        .into_iter()
        .map(|f| point_from_feature(f, fallback))
        .collect();
    print_points(&points);
    Ok(())
}

pub fn clear(args: &ClearArgs, config: &AppConfig) -> Result<()> {
    let prompt = format!("Remove every annotation of image {}?", args.image_id);
    if !args.yes && !confirm(&prompt)? {
        println!("Cancelled.");
        return Ok(());
    }
    request(
        config,
        ApiRequest::ClearFeatures {
            image_id: args.image_id,
        },
    )?;
    println!("All annotations of image {} cleared.", args.image_id);
    Ok(())
}
