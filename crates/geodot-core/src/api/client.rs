use std::io::Read;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ServerConfig;
use crate::error::{GeodotError, Result};

use super::backend::AnnotationBackend;
use super::types::{
    Ack, BuildingPoint, BuildingPointsUpload, CameraPosition, FeatureRecord, ImageRecord,
    ImageSummary, NewBuildingPoint, UploadFeatures,
};

/// Blocking JSON client for the annotation backend.
pub struct HttpBackend {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &ServerConfig) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout()).build();
        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a server-relative path.
    pub fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        debug!(%url, "GET");
        decode(check(self.agent.get(&url).call())?)
    }

    fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path);
        debug!(%url, method, "send");
        let body = serde_json::to_value(body)?;
        decode(check(self.agent.request(method, &url).send_json(body))?)
    }

    fn delete(&self, path: &str) -> Result<ureq::Response> {
        let url = self.url(path);
        debug!(%url, "DELETE");
        check(self.agent.delete(&url).call())
    }
}

impl AnnotationBackend for HttpBackend {
    fn list_images(&self) -> Result<Vec<ImageSummary>> {
        self.get_json("/api/images")
    }

    fn get_image(&self, image_id: i64) -> Result<ImageRecord> {
        self.get_json(&format!("/api/images/{image_id}"))
    }

    fn fetch_image_bytes(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.url(path);
        debug!(%url, "GET bytes");
        let response = check(self.agent.get(&url).call())?;
        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| GeodotError::Network(e.to_string()))?;
        Ok(bytes)
    }

    fn delete_image(&self, image_id: i64) -> Result<Ack> {
        decode(self.delete(&format!("/api/images/{image_id}"))?)
    }

    fn list_features(&self, image_id: i64) -> Result<Vec<FeatureRecord>> {
        self.get_json(&format!("/api/images/{image_id}/features"))
    }

    fn clear_features(&self, image_id: i64) -> Result<()> {
        self.delete(&format!("/api/images/{image_id}/features"))?;
        Ok(())
    }

    fn delete_feature(&self, image_id: i64, feature_id: i64) -> Result<()> {
        self.delete(&format!("/api/images/{image_id}/features/{feature_id}"))?;
        Ok(())
    }

    fn upload_features(&self, payload: &UploadFeatures) -> Result<Ack> {
        self.send_json("POST", "/api/upload_features", payload)
    }

    fn list_building_points(&self) -> Result<Vec<BuildingPoint>> {
        self.get_json("/api/building_points")
    }

    fn create_building_point(&self, point: &NewBuildingPoint) -> Result<Ack> {
        self.send_json("POST", "/api/upload_building_point", point)
    }

    fn upload_building_points(&self, payload: &BuildingPointsUpload) -> Result<Ack> {
        self.send_json("POST", "/api/upload_building_points", payload)
    }

    fn update_building_point(&self, id: i64, point: &NewBuildingPoint) -> Result<Ack> {
        self.send_json("PUT", &format!("/api/building_points/{id}"), point)
    }

    fn delete_building_point(&self, id: i64) -> Result<Ack> {
        decode(self.delete(&format!("/api/building_points/{id}"))?)
    }

    fn calculate_camera_position(&self, image_id: i64) -> Result<CameraPosition> {
        let url = self.url("/api/calculate_camera_position");
        debug!(%url, image_id, "POST form");
        let image_id = image_id.to_string();
        decode(check(
            self.agent
                .post(&url)
                .send_form(&[("image_id", image_id.as_str())]),
        )?)
    }
}

/// Short title for an HTTP error status.
pub fn status_title(status: u16) -> &'static str {
    match status {
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not found",
        500 => "Server error",
        502 => "Bad gateway",
        _ => "Request failed",
    }
}

fn check(result: std::result::Result<ureq::Response, ureq::Error>) -> Result<ureq::Response> {
    match result {
        Ok(response) => Ok(response),
        Err(ureq::Error::Status(status, response)) => {
            let body = response.into_string().unwrap_or_default();
            Err(http_error(status, &body))
        }
        Err(ureq::Error::Transport(transport)) => Err(GeodotError::Network(transport.to_string())),
    }
}

fn decode<T: DeserializeOwned>(response: ureq::Response) -> Result<T> {
    response
        .into_json()
        .map_err(|e| GeodotError::Network(format!("Malformed response: {e}")))
}

/// Build the error for a non-2xx status, preferring FastAPI's `detail` field.
pub(crate) fn http_error(status: u16, body: &str) -> GeodotError {
    let title = status_title(status).to_string();
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| match v.get("detail")? {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
        .or_else(|| {
            let body = body.trim();
            (!body.is_empty()).then(|| body.to_string())
        })
        .unwrap_or_else(|| title.clone());
    GeodotError::Http {
        status,
        title,
        detail,
    }
}
