use serde::{Deserialize, Deserializer, Serialize};

/// Entry of `GET /api/images`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageSummary {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
}

/// `GET /api/images/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: i64,
    pub name: String,
    /// Server-relative URL of the image bytes.
    pub path: String,
}

/// Entry of `GET /api/images/{id}/features`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub pixel_x: f64,
    pub pixel_y: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "coordinate_text")]
    pub longitude: Option<String>,
    #[serde(default, deserialize_with = "coordinate_text")]
    pub latitude: Option<String>,
    #[serde(default)]
    pub building_point_id: Option<i64>,
    #[serde(default)]
    pub label: Option<String>,
}

/// One feature in the `POST /api/upload_features` payload.
///
/// Linked points carry `building_point_id` only; unlinked points carry inline
/// longitude/latitude. Never both.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadFeature {
    pub x: f64,
    pub y: f64,
    pub image_id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub building_point_id: Option<i64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadFeatures {
    pub features: Vec<UploadFeature>,
}

/// Entry of `GET /api/building_points`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildingPoint {
    pub id: i64,
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
}

impl std::fmt::Display for BuildingPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (lon: {}, lat: {})",
            self.name, self.longitude, self.latitude
        )
    }
}

/// Body of `POST /api/upload_building_point` and `PUT /api/building_points/{id}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewBuildingPoint {
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildingPointsUpload {
    pub points: Vec<NewBuildingPoint>,
}

/// `POST /api/calculate_camera_position`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraPosition {
    pub camera_position: [f64; 3],
    #[serde(default)]
    pub message: String,
}

impl std::fmt::Display for CameraPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [x, y, z] = self.camera_position;
        write!(f, "X: {x}, Y: {y}, Z: {z}")
    }
}

/// Generic `{status?, message?}` acknowledgement.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl Ack {
    pub fn message_or(&self, fallback: &str) -> String {
        self.message.clone().unwrap_or_else(|| fallback.to_string())
    }
}

/// The backend sends coordinates as numbers, strings or null depending on the
/// record; keep them as text so they round-trip into the form unchanged.
fn coordinate_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    })
}
