use anyhow::Result;
use clap::Args;
use geodot_core::api::{ApiRequest, ApiResponse};
use geodot_core::config::AppConfig;

use super::request;

#[derive(Args)]
pub struct CameraArgs {
    /// Backend image id
    pub image_id: i64,
}

pub fn run(args: &CameraArgs, config: &AppConfig) -> Result<()> {
    let ApiResponse::Camera { position, .. } = request(
        config,
        ApiRequest::CalculateCamera {
            image_id: args.image_id,
        },
    )?
    else {
        anyhow::bail!("Unexpected response to camera calculation");
    };
    if !position.message.is_empty() {
        println!("{}", position.message);
    }
    println!("Camera position: {position}");
    Ok(())
}
