use std::path::PathBuf;

use geodot_core::annotation::Point;
use geodot_core::api::{ApiRequest, ApiResponse};
use geodot_core::catalog::FeatureCatalog;
use geodot_core::config::{AppConfig, ExportConfig, RenderConfig, ServerConfig};
use geodot_core::error::GeodotError;
use image::DynamicImage;

/// Commands sent from UI thread to worker thread.
pub enum WorkerCommand {
    /// Run one backend request.
    Api(ApiRequest),

    /// Point the backend client at a new server.
    SetServer(ServerConfig),

    /// Decode a photograph from disk.
    OpenLocalImage { path: PathBuf },

    /// Read a CSV/XLSX catalog.
    ImportCatalog { path: PathBuf },

    /// Write the catalog merged with the current points.
    ExportCsv {
        path: PathBuf,
        catalog: FeatureCatalog,
        points: Vec<Point>,
        image_name: String,
    },

    /// Render and save the print page.
    ExportImage {
        path: PathBuf,
        image: DynamicImage,
        points: Vec<Point>,
        render: RenderConfig,
        export: ExportConfig,
    },
}

/// Results sent from worker thread back to UI thread.
pub enum WorkerResult {
    /// A backend request finished; the session applies or records it.
    Api {
        request: ApiRequest,
        result: Result<ApiResponse, GeodotError>,
    },
    LocalImageLoaded {
        name: String,
        image: DynamicImage,
    },
    CatalogImported {
        path: PathBuf,
        catalog: FeatureCatalog,
    },
    ConfigImported {
        config: AppConfig,
    },
    Exported {
        path: PathBuf,
    },
    Error {
        message: String,
    },
    Log {
        message: String,
    },
}
