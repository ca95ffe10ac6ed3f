//! Integration tests for preset files

mod common;

use common::builders::ConfigBuilder;
use rock_surface::graph::{OperationRegistry, ParamValue};
use rock_surface::{Color, RockSurface, RockSurfaceConfig, RockSurfaceError, ToneMapStage};

#[test]
fn test_toml_preset_drives_surface() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("granite.toml");
    std::fs::write(
        &path,
        r##"
scale = 0.2
seed = 4242
depth = 40
value = "#808080"
switchm6 = false
"##,
    )
    .unwrap();

    let config = RockSurfaceConfig::load(&path).unwrap();
    let surface = RockSurface::new(OperationRegistry::standard(), &config).unwrap();

    assert_eq!(surface.property("seed").unwrap(), ParamValue::Int(4242));
    // out-of-range preset values are clamped like any other write
    assert_eq!(surface.property("depth").unwrap(), ParamValue::Int(25));
    assert_eq!(
        surface.property("value").unwrap(),
        ParamValue::Color(Color::rgb(0x80, 0x80, 0x80))
    );
    assert_eq!(surface.tone_map_stage(), ToneMapStage::Bypass);
}

#[test]
fn test_json_preset_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sandstone.json");

    let config = ConfigBuilder::new()
        .seed(11)
        .azimuth(180.0)
        .color(Color::rgba(0xc2, 0xb2, 0x80, 0x80))
        .build();
    config.save(&path).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("\"#c2b28080\""));

    let loaded = RockSurfaceConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_surface_to_config_saves_current_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("current.toml");

    let mut surface = ConfigBuilder::new().seed(5).surface();
    surface.set_property("elevation", ParamValue::Double(42.5)).unwrap();
    surface.set_property("switchm6", ParamValue::Bool(false)).unwrap();
    surface.to_config().unwrap().save(&path).unwrap();

    let restored = RockSurface::new(
        OperationRegistry::standard(),
        &RockSurfaceConfig::load(&path).unwrap(),
    )
    .unwrap();
    assert_eq!(restored.properties().unwrap(), surface.properties().unwrap());
    assert_eq!(restored.graph().edge_set(), surface.graph().edge_set());
}

#[test]
fn test_malformed_preset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "depth = \"deep\"").unwrap();

    let err = RockSurfaceConfig::load(&path).unwrap_err();
    assert!(matches!(err.root(), RockSurfaceError::Config(_)));
    assert_eq!(
        RockSurfaceConfig::load_or_default(&path),
        RockSurfaceConfig::default()
    );
}

#[test]
fn test_missing_preset_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = RockSurfaceConfig::load(&path).unwrap_err();
    assert!(matches!(err.root(), RockSurfaceError::Config(_)));
}
