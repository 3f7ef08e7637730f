use serde_json::json;

use geodot_core::api::status_title;
use geodot_core::api::types::{
    Ack, BuildingPointsUpload, CameraPosition, FeatureRecord, ImageSummary, NewBuildingPoint,
    UploadFeature,
};
use geodot_core::error::GeodotError;
use geodot_core::session::point_from_feature;

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[test]
fn test_feature_record_accepts_numeric_and_text_coordinates() {
    let records: Vec<FeatureRecord> = serde_json::from_value(json!([
        {"id": 1, "pixel_x": 10.5, "pixel_y": 3, "name": "Gate",
         "longitude": 116.4, "latitude": "39.9", "building_point_id": null},
        {"pixel_x": 1, "pixel_y": 2, "longitude": null, "latitude": "", "label": "G"}
    ]))
    .unwrap();
    assert_eq!(records[0].longitude.as_deref(), Some("116.4"));
    assert_eq!(records[0].latitude.as_deref(), Some("39.9"));
    assert_eq!(records[1].id, None);
    assert_eq!(records[1].longitude, None);
    assert_eq!(records[1].latitude, None);
    assert_eq!(records[1].label.as_deref(), Some("G"));
}

#[test]
fn test_point_from_feature_defaults_name() {
    let record: FeatureRecord = serde_json::from_value(json!(
        {"id": 4, "pixel_x": 1, "pixel_y": 2, "name": "", "label": "X", "building_point_id": 8}
    ))
    .unwrap();
    let point = point_from_feature(record, "Unnamed point");
    assert_eq!(point.name, "Unnamed point");
    assert_eq!(point.symbol.as_deref(), Some("X"));
    assert_eq!(point.building_point_id, Some(8));
    assert_eq!(point.id, Some(4));
}

#[test]
fn test_image_summary_path_optional() {
    let images: Vec<ImageSummary> =
        serde_json::from_value(json!([{"id": 1, "name": "a.jpg"}])).unwrap();
    assert_eq!(images[0].path, None);
}

#[test]
fn test_camera_position_message_optional() {
    let camera: CameraPosition =
        serde_json::from_value(json!({"camera_position": [1, 2, 3]})).unwrap();
    assert_eq!(camera.camera_position, [1.0, 2.0, 3.0]);
    assert_eq!(camera.message, "");
}

#[test]
fn test_ack_fallback_message() {
    let ack: Ack = serde_json::from_value(json!({"status": "success"})).unwrap();
    assert_eq!(ack.message_or("Saved"), "Saved");
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn test_upload_feature_omits_absent_fields() {
    let feature = UploadFeature {
        x: 1.0,
        y: 2.0,
        image_id: 3,
        name: "Gate".into(),
        symbol: None,
        longitude: None,
        latitude: None,
        building_point_id: Some(5),
    };
    assert_eq!(
        serde_json::to_value(&feature).unwrap(),
        json!({"x": 1.0, "y": 2.0, "image_id": 3, "name": "Gate", "building_point_id": 5})
    );
}

#[test]
fn test_bulk_building_points_shape() {
    let body = BuildingPointsUpload {
        points: vec![NewBuildingPoint {
            name: "Hall".into(),
            longitude: 116.0,
            latitude: 39.5,
        }],
    };
    assert_eq!(
        serde_json::to_value(&body).unwrap(),
        json!({"points": [{"name": "Hall", "longitude": 116.0, "latitude": 39.5}]})
    );
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[test]
fn test_status_titles() {
    assert_eq!(status_title(401), "Unauthorized");
    assert_eq!(status_title(403), "Forbidden");
    assert_eq!(status_title(404), "Not found");
    assert_eq!(status_title(500), "Server error");
    assert_eq!(status_title(502), "Bad gateway");
    assert_eq!(status_title(418), "Request failed");
}

#[test]
fn test_network_classification() {
    assert!(GeodotError::Network("x".into()).is_network());
    assert!(GeodotError::Http {
        status: 500,
        title: "Server error".into(),
        detail: "boom".into()
    }
    .is_network());
    assert!(!GeodotError::Parse("x".into()).is_network());
}
