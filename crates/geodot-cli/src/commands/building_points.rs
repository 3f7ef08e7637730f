use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use geodot_core::annotation::AnnotationForm;
use geodot_core::api::types::NewBuildingPoint;
use geodot_core::api::{AnnotationBackend, ApiRequest, ApiResponse};
use geodot_core::config::AppConfig;

use super::{backend, confirm, request, spinner};
use crate::summary::print_building_points;

#[derive(Subcommand)]
pub enum BuildingPointsCommand {
    /// List stored building points
    List,
    /// Store a new building point
    Create(PointFields),
    /// Change a stored building point
    Update {
        /// Building point id
        id: i64,
        #[command(flatten)]
        fields: PointFields,
    },
    /// Delete a building point and the annotations linked to it
    Delete {
        /// Building point id
        id: i64,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Args)]
pub struct PointFields {
    /// Building name
    #[arg(long)]
    pub name: String,

    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lon: String,

    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: String,
}

impl PointFields {
    /// Validate through the same rules the annotation form applies.
    fn to_body(&self) -> Result<NewBuildingPoint> {
        let form = AnnotationForm {
            name: self.name.clone(),
            longitude: self.lon.clone(),
            latitude: self.lat.clone(),
            ..Default::default()
        };
        Ok(form.to_building_point()?)
    }
}

pub fn run(cmd: &BuildingPointsCommand, config: &AppConfig) -> Result<()> {
    match cmd {
        BuildingPointsCommand::List => {
            let ApiResponse::BuildingPoints(points) = request(config, ApiRequest::ListBuildingPoints)?
            else {
                anyhow::bail!("Unexpected response to building point listing");
            };
            print_building_points(&points);
        }
        BuildingPointsCommand::Create(fields) => {
            let body = fields.to_body()?;
            let ApiResponse::BuildingPointCreated(ack) =
                request(config, ApiRequest::CreateBuildingPoint(body))?
            else {
                anyhow::bail!("Unexpected response to building point creation");
            };
            println!("{}", ack.message_or("Building point saved"));
        }
        BuildingPointsCommand::Update { id, fields } => {
            let body = fields.to_body()?;
            let pb = spinner("Updating building point")?;
            let result = backend(config).update_building_point(*id, &body);
            pb.finish_and_clear();
            let ack = result.with_context(|| format!("Failed to update building point {id}"))?;
            println!("{}", ack.message_or("Building point updated"));
        }
        BuildingPointsCommand::Delete { id, yes } => {
            let prompt = format!("Delete building point {id} and its linked annotations?");
            if !*yes && !confirm(&prompt)? {
                println!("Cancelled.");
                return Ok(());
            }
            let pb = spinner("Deleting building point")?;
            let result = backend(config).delete_building_point(*id);
            pb.finish_and_clear();
            let ack = result.with_context(|| format!("Failed to delete building point {id}"))?;
            println!("{}", ack.message_or("Building point deleted"));
        }
    }
    Ok(())
}
