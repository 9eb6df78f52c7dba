use super::*;

#[test]
fn empty_object_yields_defaults() {
    let cfg = AppConfig::from_json("{}").unwrap();
    assert_eq!(cfg, AppConfig::default());
    assert_eq!(cfg.scene.desktop.count, 35);
    assert_eq!(cfg.scene.mobile.count, 20);
    assert_eq!(cfg.share.font_family, "Caveat");
}

#[test]
fn partial_scene_override_keeps_other_defaults() {
    let cfg = AppConfig::from_json(
        r##"{ "scene": { "easing": 0.5, "background": "#000000" }, "share": { "seed": 7 } }"##,
    )
    .unwrap();
    assert_eq!(cfg.scene.easing, 0.5);
    assert_eq!(cfg.scene.background, Rgba8::rgb(0, 0, 0));
    assert_eq!(cfg.scene.grid_spacing, 60.0);
    assert_eq!(cfg.share.seed, Some(7));
    assert_eq!(cfg.share.branding, "dailydoseofmotivation.app");
}

#[test]
fn invalid_values_are_config_errors() {
    let err = AppConfig::from_json(r#"{ "scene": { "easing": 1.5 } }"#).unwrap_err();
    assert!(err.to_string().starts_with("config error:"));

    let err = AppConfig::from_json(r#"{ "scene": { "grid_spacing": 0 } }"#).unwrap_err();
    assert!(err.to_string().contains("grid_spacing"));

    let err = AppConfig::from_json(r#"{ "scene": { "opacity_min": 0.9 } }"#).unwrap_err();
    assert!(err.to_string().contains("opacity band"));
}

#[test]
fn malformed_json_and_unknown_fields_are_rejected() {
    assert!(AppConfig::from_json("{").is_err());
    assert!(AppConfig::from_json(r#"{ "scnee": {} }"#).is_err());
}

#[test]
fn missing_file_is_a_config_error() {
    let err = AppConfig::from_path(Path::new("/nope/quotedoodle.json")).unwrap_err();
    assert!(err.to_string().starts_with("config error:"));
}

#[test]
fn breakpoint_selects_population() {
    let cfg = SceneConfig::default();
    assert!(cfg.is_mobile(767.0));
    assert!(!cfg.is_mobile(768.0));
    assert_eq!(cfg.population(375.0).count, 20);
    assert_eq!(cfg.population(1440.0).count, 35);
}

#[test]
fn defaults_validate() {
    SceneConfig::default().validate().unwrap();
}
