use tracing::info;

use crate::error::Result;

use super::types::{
    Ack, BuildingPoint, BuildingPointsUpload, CameraPosition, FeatureRecord, ImageRecord,
    ImageSummary, NewBuildingPoint, UploadFeatures,
};

/// Operations the backend exposes. `HttpBackend` talks to a real server;
/// tests substitute an in-memory fake.
pub trait AnnotationBackend {
    fn list_images(&self) -> Result<Vec<ImageSummary>>;
    fn get_image(&self, image_id: i64) -> Result<ImageRecord>;
    /// Raw bytes of the file at a server-relative `path`.
    fn fetch_image_bytes(&self, path: &str) -> Result<Vec<u8>>;
    fn delete_image(&self, image_id: i64) -> Result<Ack>;

    fn list_features(&self, image_id: i64) -> Result<Vec<FeatureRecord>>;
    fn clear_features(&self, image_id: i64) -> Result<()>;
    fn delete_feature(&self, image_id: i64, feature_id: i64) -> Result<()>;
    fn upload_features(&self, payload: &UploadFeatures) -> Result<Ack>;

    fn list_building_points(&self) -> Result<Vec<BuildingPoint>>;
    fn create_building_point(&self, point: &NewBuildingPoint) -> Result<Ack>;
    fn upload_building_points(&self, payload: &BuildingPointsUpload) -> Result<Ack>;
    fn update_building_point(&self, id: i64, point: &NewBuildingPoint) -> Result<Ack>;
    fn delete_building_point(&self, id: i64) -> Result<Ack>;

    fn calculate_camera_position(&self, image_id: i64) -> Result<CameraPosition>;
}

/// A unit of backend work, built on the UI thread and run on a worker.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiRequest {
    ListImages,
    /// Image record, its bytes and its features in one step.
    OpenImage { image_id: i64 },
    ListFeatures { image_id: i64 },
    UploadFeatures { image_id: i64, payload: UploadFeatures },
    /// `index` is the store row removed once the backend confirms.
    DeleteFeature { image_id: i64, feature_id: i64, index: usize },
    ClearFeatures { image_id: i64 },
    ListBuildingPoints,
    CreateBuildingPoint(NewBuildingPoint),
    UploadBuildingPoints(BuildingPointsUpload),
    CalculateCamera { image_id: i64 },
}

impl ApiRequest {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::ListImages => "load images",
            Self::OpenImage { .. } => "open image",
            Self::ListFeatures { .. } => "load annotations",
            Self::UploadFeatures { .. } => "save annotations",
            Self::DeleteFeature { .. } => "delete annotation",
            Self::ClearFeatures { .. } => "clear annotations",
            Self::ListBuildingPoints => "load building points",
            Self::CreateBuildingPoint(_) => "save building point",
            Self::UploadBuildingPoints(_) => "upload building points",
            Self::CalculateCamera { .. } => "calculate camera position",
        }
    }
}

/// Result of a successful `ApiRequest`, applied to the session as a whole.
#[derive(Clone, Debug, PartialEq)]
pub enum ApiResponse {
    Images(Vec<ImageSummary>),
    ImageOpened {
        record: ImageRecord,
        bytes: Vec<u8>,
        features: Vec<FeatureRecord>,
    },
    Features {
        image_id: i64,
        features: Vec<FeatureRecord>,
    },
    FeaturesUploaded {
        image_id: i64,
        ack: Ack,
    },
    FeatureDeleted {
        image_id: i64,
        feature_id: i64,
        index: usize,
    },
    FeaturesCleared {
        image_id: i64,
    },
    BuildingPoints(Vec<BuildingPoint>),
    BuildingPointCreated(Ack),
    BuildingPointsUploaded {
        count: usize,
        ack: Ack,
    },
    Camera {
        image_id: i64,
        position: CameraPosition,
    },
}

/// Run one request against `backend`.
pub fn execute(backend: &dyn AnnotationBackend, request: ApiRequest) -> Result<ApiResponse> {
    info!(request = request.describe(), "Backend request");
    Ok(match request {
        ApiRequest::ListImages => ApiResponse::Images(backend.list_images()?),
        ApiRequest::OpenImage { image_id } => {
            let record = backend.get_image(image_id)?;
            let bytes = backend.fetch_image_bytes(&record.path)?;
            let features = backend.list_features(image_id)?;
            ApiResponse::ImageOpened {
                record,
                bytes,
                features,
            }
        }
        ApiRequest::ListFeatures { image_id } => ApiResponse::Features {
            image_id,
            features: backend.list_features(image_id)?,
        },
        ApiRequest::UploadFeatures { image_id, payload } => ApiResponse::FeaturesUploaded {
            image_id,
            ack: backend.upload_features(&payload)?,
        },
        ApiRequest::DeleteFeature {
            image_id,
            feature_id,
            index,
        } => {
            backend.delete_feature(image_id, feature_id)?;
            ApiResponse::FeatureDeleted {
                image_id,
                feature_id,
                index,
            }
        }
        ApiRequest::ClearFeatures { image_id } => {
            backend.clear_features(image_id)?;
            ApiResponse::FeaturesCleared { image_id }
        }
        ApiRequest::ListBuildingPoints => {
            ApiResponse::BuildingPoints(backend.list_building_points()?)
        }
        ApiRequest::CreateBuildingPoint(point) => {
            ApiResponse::BuildingPointCreated(backend.create_building_point(&point)?)
        }
        ApiRequest::UploadBuildingPoints(payload) => ApiResponse::BuildingPointsUploaded {
            count: payload.points.len(),
            ack: backend.upload_building_points(&payload)?,
        },
        ApiRequest::CalculateCamera { image_id } => ApiResponse::Camera {
            image_id,
            position: backend.calculate_camera_position(image_id)?,
        },
    })
}
