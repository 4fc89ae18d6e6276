use std::io::Write;

use circuitry::transforms::WSPoint;
use circuitry::viewport::Camera;
use circuitry::{Circuit, CircuitError, ComponentKind, SimConfig};

#[test]
fn loads_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"grid_size": 50, "pin_hover_radius": 4, "initial_viewport": {{"width": 400, "height": 300}}}}"#
    )
    .unwrap();
    let config = SimConfig::load(file.path()).unwrap();
    assert_eq!(config.grid_size, 50.0);
    assert_eq!(config.pin_hover_radius, 4.0);

    let mut c = Circuit::new(config);
    let id = c.place_component(ComponentKind::not(), WSPoint::new(120.0, 99.0), 0.0);
    assert_eq!(c.component(id).unwrap().position(), WSPoint::new(100.0, 50.0));
    // baseline is now 400x300, so 800x600 doubles the scale
    assert!(c.resize_viewport(800.0, 600.0, 400.0, 300.0));
    assert_eq!(c.component(id).unwrap().scale(), 2.0);
}

#[test]
fn invalid_file_reports_reason() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"wire_tolerance": -1}}"#).unwrap();
    let err = SimConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, CircuitError::InvalidConfig(_)));
    assert!(err.to_string().contains("wire_tolerance"));
}

#[test]
fn camera_uses_configured_zoom_limits() {
    let config = SimConfig::from_json_str(r#"{"min_zoom": 0.25, "max_zoom": 4.0}"#).unwrap();
    let mut cam = Camera::from_config(&config);
    cam.zoom_at(cam.offset(), 1000.0);
    assert_eq!(cam.zoom(), 4.0);
    cam.zoom_at(cam.offset(), -1000.0);
    assert_eq!(cam.zoom(), 0.25);
}
