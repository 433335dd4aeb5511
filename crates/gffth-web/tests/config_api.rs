//! Integration tests for the public config API

use gffth_web::SiteError;
use gffth_web::config::SiteConfig;

#[test]
fn test_inline_config_document_overrides_selected_fields() -> Result<(), SiteError> {
    let json = r#"{
        "navigation": { "menuId": "site-menu", "menuToggleId": "site-menu-button" },
        "lazy": { "sourceAttribute": "data-original" },
        "intersectionThreshold": 0.2,
        "logLevel": "debug"
    }"#;

    let config = SiteConfig::from_json(json)?;
    assert_eq!(config.navigation.menu_id, "site-menu");
    assert_eq!(config.navigation.menu_toggle_id, "site-menu-button");
    assert_eq!(config.navigation.active_class, "active");
    assert_eq!(config.lazy.source_attribute, "data-original");
    assert_eq!(config.lazy.marker_class, "lazy");
    assert!((config.intersection_threshold - 0.2).abs() < f64::EPSILON);
    Ok(())
}

#[test]
fn test_empty_document_is_default() -> Result<(), SiteError> {
    assert_eq!(SiteConfig::from_json("{}")?, SiteConfig::default());
    Ok(())
}

#[test]
fn test_negative_threshold_rejected() {
    let result = SiteConfig::from_json(r#"{ "intersectionThreshold": -0.1 }"#);
    assert!(matches!(result, Err(SiteError::Config(_))));
}

#[test]
fn test_config_serializes_camel_case() {
    let json = serde_json::to_string(&SiteConfig::default()).unwrap_or_default();
    assert!(json.contains("\"intersectionThreshold\""));
    assert!(json.contains("\"menuToggleId\""));
    assert!(json.contains("\"defaultSpeed\""));
}
