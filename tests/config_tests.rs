use plutonium_panels::{DepthCompare, PanelConfig, PanelError, Style, StyleConfig};

#[test]
fn defaults_fill_missing_fields() {
    let config = PanelConfig::from_json_str(
        r#"{
            "layer": { "gui_depth": 0.5, "depth_compare": "less_equal" },
            "styles": { "button": { "border_width": 3.0 } }
        }"#,
    )
    .unwrap();
    assert!((config.layer.gui_depth - 0.5).abs() < 1e-6);
    assert_eq!(config.layer.depth_compare, DepthCompare::LessEqual);
    assert_eq!(config.window.width, 800);

    let button = &config.styles["button"];
    assert!((button.border_width - 3.0).abs() < 1e-6);
    assert_eq!(button.fill_color, StyleConfig::default().fill_color);
}

#[test]
fn empty_document_is_the_default_config() {
    assert_eq!(PanelConfig::from_json_str("{}").unwrap(), PanelConfig::default());
    assert_eq!(PanelConfig::default().layer.depth_compare, DepthCompare::Less);
}

#[test]
fn gui_depth_outside_clip_range_is_rejected() {
    let err = PanelConfig::from_json_str(r#"{ "layer": { "gui_depth": 1.5 } }"#).unwrap_err();
    assert!(matches!(err, PanelError::InvalidConfig(_)));
}

#[test]
fn malformed_json_is_reported() {
    let err = PanelConfig::from_json_str("{ \"layer\": ").unwrap_err();
    assert!(matches!(err, PanelError::Json(_)));
}

#[test]
fn loads_from_file() {
    let path = std::env::temp_dir().join(format!("panels-{}.json", uuid::Uuid::new_v4()));
    std::fs::write(&path, r#"{ "window": { "title": "demo" } }"#).unwrap();
    let config = PanelConfig::from_json_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.window.title, "demo");

    let missing = PanelConfig::from_json_file(&path).unwrap_err();
    assert!(matches!(missing, PanelError::Io(_)));
}

#[test]
fn style_validation_rejects_bad_widths() {
    let negative = StyleConfig {
        border_width: -1.0,
        ..StyleConfig::default()
    };
    assert!(matches!(
        Style::from_config(&negative),
        Err(PanelError::InvalidStyle(_))
    ));

    let nan = StyleConfig {
        button_hover_width: f32::NAN,
        ..StyleConfig::default()
    };
    assert!(Style::from_config(&nan).is_err());

    // buttons may shrink when hovered
    let shrink = StyleConfig {
        button_hover_width: -2.0,
        ..StyleConfig::default()
    };
    assert!(Style::from_config(&shrink).is_ok());
}

#[test]
fn invalid_named_style_is_rejected_at_load() {
    let err = PanelConfig::from_json_str(r#"{ "styles": { "button": { "border_width": -3.0 } } }"#)
        .unwrap_err();
    match err {
        PanelError::InvalidConfig(msg) => assert!(msg.contains("button")),
        other => panic!("unexpected error: {other}"),
    }

    let ok = PanelConfig::from_json_str(r#"{ "styles": { "button": { "border_width": 3.0 } } }"#)
        .unwrap();
    assert_eq!(ok.styles["button"].border_width, 3.0);
}

#[test]
fn window_system_failures_have_their_own_error() {
    let err = PanelError::Platform("no display".to_string());
    assert_eq!(err.to_string(), "window system error: no display");
    assert!(!matches!(err, PanelError::Gpu(_)));
}
