mod common;

use approx::assert_relative_eq;

use geodot_core::api::types::BuildingPoint;
use geodot_core::api::{execute, AnnotationBackend, ApiRequest};
use geodot_core::catalog::{FeatureCatalog, FeaturePointReference};
use geodot_core::config::AppConfig;
use geodot_core::error::{GeodotError, ValidationError};
use geodot_core::geometry::{Size, Vec2};
use geodot_core::input::{InputEvent, PointerButton};
use geodot_core::session::{NoticeLevel, Session};

use common::{feature, solid_image, FakeBackend};

/// Run a request and every follow-up it triggers.
fn run(session: &mut Session, backend: &dyn AnnotationBackend, request: ApiRequest) {
    let mut next = Some(request);
    while let Some(request) = next.take() {
        match execute(backend, request.clone()) {
            Ok(response) => next = session.apply(response),
            Err(e) => session.fail(&request, &e),
        }
    }
}

fn opened_session(backend: &FakeBackend) -> Session {
    let mut session = Session::new(AppConfig::default());
    session.set_container(Size::new(400.0, 300.0));
    let request = session.open_image(7);
    run(&mut session, backend, request);
    session
}

fn click(session: &mut Session, x: f64, y: f64) {
    session.handle_input(&InputEvent::PointerDown {
        button: PointerButton::Primary,
        pos: Vec2::new(x, y),
    });
}

// ---------------------------------------------------------------------------
// Opening images
// ---------------------------------------------------------------------------

#[test]
fn test_open_image_loads_features_and_fits() {
    let backend = FakeBackend::with_image(800, 600);
    backend.features.borrow_mut().push(feature(1, 5.0, 6.0, None));
    let mut labelled = feature(2, 7.0, 8.0, Some("Gate"));
    labelled.label = Some("G".into());
    backend.features.borrow_mut().push(labelled);

    let session = opened_session(&backend);
    let image = session.image().unwrap();
    assert_eq!(image.id, Some(7));
    assert_eq!(image.size(), Size::new(800.0, 600.0));
    assert_relative_eq!(session.transform.scale, 0.5);

    assert_eq!(session.store.len(), 2);
    assert_eq!(session.store.get(0).unwrap().name, "Unnamed point");
    assert_eq!(session.store.get(1).unwrap().label(), "G");
    assert_eq!(session.image_generation(), 1);
}

#[test]
fn test_open_image_failure_keeps_state() {
    let backend = FakeBackend::with_image(10, 10);
    let mut session = opened_session(&backend);
    session.take_notices();
    backend.fail_next(GeodotError::Network("connection refused".into()));
    let request = session.open_image(7);
    run(&mut session, &backend, request);
    assert_eq!(session.image_generation(), 1);
    let notices = session.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert!(notices[0].message.contains("connection refused"));
}

#[test]
fn test_clicks_ignored_before_image() {
    let mut session = Session::new(AppConfig::default());
    click(&mut session, 10.0, 10.0);
    assert!(session.store.is_empty());
    assert!(session.take_notices().is_empty());
}

// ---------------------------------------------------------------------------
// Saving
// ---------------------------------------------------------------------------

#[test]
fn test_save_uploads_and_reloads_ids() {
    let backend = FakeBackend::with_image(800, 600);
    let mut session = opened_session(&backend);
    session.form = common::named_form("Gate");
    session.form.longitude = "116.4".into();
    click(&mut session, 100.0, 100.0);
    assert_eq!(session.store.len(), 1);
    assert_eq!(session.store.get(0).unwrap().id, None);

    let request = session.save_points().unwrap();
    run(&mut session, &backend, request);

    let upload = backend.uploads.borrow()[0].clone();
    assert_eq!(upload.features[0].image_id, 7);
    assert_eq!(upload.features[0].longitude, Some(116.4));
    assert_eq!(session.store.get(0).unwrap().id, Some(100));
    assert!(backend.calls.borrow().ends_with(&["upload_features".into(), "list_features".into()]));
}

#[test]
fn test_save_requires_points_and_backend_image() {
    let mut session = Session::new(AppConfig::default());
    assert_eq!(session.save_points().unwrap_err(), ValidationError::NoImage);

    session.open_local_image("local.png", solid_image(20, 20, [0, 0, 0, 255]));
    assert_eq!(session.save_points().unwrap_err(), ValidationError::ImageNotPersisted);

    let backend = FakeBackend::with_image(20, 20);
    let session = opened_session(&backend);
    assert_eq!(session.save_points().unwrap_err(), ValidationError::NothingToSave);
}

// ---------------------------------------------------------------------------
// Deleting
// ---------------------------------------------------------------------------

#[test]
fn test_delete_waits_for_confirmation() {
    let backend = FakeBackend::with_image(100, 100);
    backend.features.borrow_mut().push(feature(1, 1.0, 1.0, Some("a")));
    backend.features.borrow_mut().push(feature(2, 2.0, 2.0, Some("b")));
    let mut session = opened_session(&backend);

    let request = session.delete_point(0).unwrap().unwrap();
    assert_eq!(session.store.len(), 2, "nothing removed before confirmation");

    backend.fail_next(GeodotError::Http {
        status: 500,
        title: "Server error".into(),
        detail: "boom".into(),
    });
    run(&mut session, &backend, request.clone());
    assert_eq!(session.store.len(), 2, "failed delete leaves the store alone");

    run(&mut session, &backend, request);
    assert_eq!(session.store.len(), 1);
    assert_eq!(session.store.get(0).unwrap().name, "b");
}

#[test]
fn test_delete_unsaved_point_is_local() {
    let backend = FakeBackend::with_image(100, 100);
    let mut session = opened_session(&backend);
    session.form = common::named_form("tmp");
    click(&mut session, 10.0, 10.0);
    assert!(session.delete_point(0).unwrap().is_none());
    assert!(session.store.is_empty());
    assert!(matches!(session.delete_point(0), Err(GeodotError::NotFound { .. })));
}

#[test]
fn test_clear_all_only_after_success() {
    let backend = FakeBackend::with_image(100, 100);
    backend.features.borrow_mut().push(feature(1, 1.0, 1.0, Some("a")));
    let mut session = opened_session(&backend);

    let request = session.clear_points().unwrap().unwrap();
    backend.fail_next(GeodotError::Network("timeout".into()));
    run(&mut session, &backend, request.clone());
    assert_eq!(session.store.len(), 1);

    run(&mut session, &backend, request);
    assert!(session.store.is_empty());
}

#[test]
fn test_stale_features_are_still_applied() {
    let backend = FakeBackend::with_image(100, 100);
    let mut session = opened_session(&backend);
    backend.features.borrow_mut().push(feature(9, 3.0, 3.0, Some("late")));
    run(&mut session, &backend, ApiRequest::ListFeatures { image_id: 99 });
    assert_eq!(session.store.len(), 1);
}

// ---------------------------------------------------------------------------
// Building points, catalog, camera
// ---------------------------------------------------------------------------

#[test]
fn test_save_building_point_refreshes_and_clears_form() {
    let backend = FakeBackend::with_image(10, 10);
    let mut session = Session::new(AppConfig::default());
    session.form = common::named_form("Hall");
    assert_eq!(
        session.save_building_point().unwrap_err(),
        ValidationError::IncompleteBuildingPoint
    );
    session.form.longitude = "116.3".into();
    session.form.latitude = "39.9".into();
    let request = session.save_building_point().unwrap();
    run(&mut session, &backend, request);

    assert_eq!(session.building_points().len(), 1);
    assert_eq!(session.building_points()[0].name, "Hall");
    assert_eq!(session.form, Default::default());
}

#[test]
fn test_select_building_point_prefills_form() {
    let backend = FakeBackend::with_image(10, 10);
    backend.building_points.borrow_mut().push(BuildingPoint {
        id: 3,
        name: "Temple".into(),
        longitude: 116.25,
        latitude: 39.5,
    });
    let mut session = Session::new(AppConfig::default());
    let request = session.refresh_building_points();
    run(&mut session, &backend, request);
    session.select_building_point(3).unwrap();
    assert_eq!(session.form.name, "Temple");
    assert_eq!(session.form.longitude, "116.25");
    assert_eq!(session.form.building_point_id, Some(3));
    assert!(session.select_building_point(4).is_err());
}

#[test]
fn test_catalog_import_uploads_when_configured() {
    let backend = FakeBackend::with_image(10, 10);
    let mut session = Session::new(AppConfig::default());
    let catalog = FeatureCatalog::from_entries([FeaturePointReference {
        symbol: Some("A".into()),
        name: "Gate".into(),
        longitude: Some("116.1".into()),
        latitude: Some("39.1".into()),
        ..Default::default()
    }]);
    let request = session.set_catalog(catalog.clone()).unwrap();
    run(&mut session, &backend, request);
    assert_eq!(session.building_points().len(), 1);

    session.select_catalog_entry("A-Gate").unwrap();
    assert_eq!(session.form.symbol, "A");
    assert_eq!(session.form.latitude, "39.1");

    let mut config = AppConfig::default();
    config.catalog.upload_on_import = false;
    session.set_config(config);
    assert!(session.set_catalog(catalog).is_none());
}

#[test]
fn test_camera_result_is_held_until_taken() {
    let backend = FakeBackend::with_image(10, 10);
    let mut session = opened_session(&backend);
    let request = session.calculate_camera().unwrap();
    run(&mut session, &backend, request);
    let camera = session.take_camera_result().unwrap();
    assert_eq!(camera.camera_position, [1.5, -2.0, 30.0]);
    assert_eq!(camera.to_string(), "X: 1.5, Y: -2, Z: 30");
    assert!(session.take_camera_result().is_none());
}

// ---------------------------------------------------------------------------
// Viewport helpers
// ---------------------------------------------------------------------------

#[test]
fn test_zoom_percent_about_centre() {
    let backend = FakeBackend::with_image(800, 600);
    let mut session = opened_session(&backend);
    let centre = Vec2::new(200.0, 150.0);
    let before = session.transform.to_image_space(centre);
    session.set_zoom_percent(200);
    assert_relative_eq!(session.transform.scale, 2.0);
    let after = session.transform.to_image_space(centre);
    assert_relative_eq!(before.x, after.x, epsilon = 1e-9);
    assert_relative_eq!(before.y, after.y, epsilon = 1e-9);

    session.set_zoom_percent(5);
    assert_eq!(session.transform.zoom_percent(), 10);
    session.fit_to_view();
    assert_relative_eq!(session.transform.scale, 0.5);
}

#[test]
fn test_pointer_readout_follows_moves() {
    let backend = FakeBackend::with_image(800, 600);
    let mut session = opened_session(&backend);
    session.handle_input(&InputEvent::PointerMove { pos: Vec2::new(100.0, 50.0) });
    assert_eq!(session.pointer(), Some(Vec2::new(200.0, 100.0)));
    session.handle_input(&InputEvent::PointerLeave);
    assert_eq!(session.pointer(), None);
}
