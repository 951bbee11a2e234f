use super::*;

#[test]
fn defaults_validate() {
    let cfg = OverlayConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.target_aspect_ratio, AspectRatio::new(16.0, 9.0).unwrap());
    assert!(cfg.with_shadow_mask);
}

#[test]
fn partial_json_fills_defaults() {
    let json = r#"{ "appearance_frequency_percent": 30, "target_aspect_ratio": { "width": 21, "height": 9 } }"#;
    let cfg: OverlayConfig = serde_json::from_str(json).unwrap();
    assert_eq!(cfg.appearance_frequency_percent, 30.0);
    assert_eq!(cfg.target_aspect_ratio.width, 21.0);
    assert_eq!(cfg.base_resolution, 100.0);
    assert_eq!(cfg.fixed_output_size, None);
}

#[test]
fn invalid_parameters_are_config_errors() {
    let bad = [
        OverlayConfig {
            target_aspect_ratio: AspectRatio {
                width: -16.0,
                height: 9.0,
            },
            ..Default::default()
        },
        OverlayConfig {
            appearance_frequency_percent: 101.0,
            ..Default::default()
        },
        OverlayConfig {
            blur_radius_base: -0.1,
            ..Default::default()
        },
        OverlayConfig {
            base_resolution: 0.0,
            ..Default::default()
        },
        OverlayConfig {
            fixed_output_size: Some(Dimensions {
                width: 0,
                height: 1080,
            }),
            ..Default::default()
        },
    ];
    for cfg in bad {
        assert!(matches!(cfg.validate(), Err(GazerError::Config(_))), "{cfg:?}");
    }
}

#[test]
fn malformed_json_file_is_a_serde_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cfg.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        OverlayConfig::from_json_path(&path),
        Err(GazerError::Serde(_))
    ));
}
