use anyhow::{Context, Result};
use clap::Args;
use geodot_core::api::types::ImageSummary;
use geodot_core::api::{AnnotationBackend, ApiRequest, ApiResponse};
use geodot_core::config::AppConfig;

use super::{backend, confirm, request, spinner};

#[derive(Args)]
pub struct ImagesArgs {}

#[derive(Args)]
pub struct DeleteImageArgs {
    /// Backend image id
    pub image_id: i64,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

pub fn run(_args: &ImagesArgs, config: &AppConfig) -> Result<()> {
    let ApiResponse::Images(images) = request(config, ApiRequest::ListImages)? else {
        anyhow::bail!("Unexpected response to image listing");
    };
    print_images(&images);
    Ok(())
}

fn print_images(images: &[ImageSummary]) {
    if images.is_empty() {
        println!("No images on the server.");
        return;
    }
    println!("{:>6}  {:<32}  {}", "Id", "Name", "Path");
    println!("{}", "-".repeat(60));
    for image in images {
        println!(
            "{:>6}  {:<32}  {}",
            image.id,
            image.name,
            image.path.as_deref().unwrap_or("-")
        );
    }
}

pub fn delete(args: &DeleteImageArgs, config: &AppConfig) -> Result<()> {
    let prompt = format!("Delete image {} and all its annotations?", args.image_id);
    if !args.yes && !confirm(&prompt)? {
        println!("Cancelled.");
        return Ok(());
    }
    let pb = spinner("Deleting image")?;
    let result = backend(config).delete_image(args.image_id);
    pb.finish_and_clear();
    let ack = result.with_context(|| format!("Failed to delete image {}", args.image_id))?;
    println!("{}", ack.message_or("Image deleted"));
    Ok(())
}
