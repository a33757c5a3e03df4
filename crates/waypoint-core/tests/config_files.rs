//! Loading `TourConfig` from TOML and JSON files.
//!
//! Run:
//!   cargo test -p waypoint-core --features config-files --test config_files

use std::io::Write;

use waypoint_core::config::{ScrollBehavior, TourConfig};
use waypoint_core::error::ConfigError;

#[test]
fn toml_overrides_only_given_keys() {
    let config = TourConfig::from_toml_str(
        r#"
        margin = 12.0
        scroll = "instant"
        "#,
    )
    .expect("valid toml");
    assert_eq!(config.margin, 12.0);
    assert_eq!(config.scroll, ScrollBehavior::Instant);
    assert_eq!(config.card_width, TourConfig::default().card_width);
}

#[test]
fn json_round_trip_of_defaults() {
    let json = serde_json::to_string(&TourConfig::default()).expect("serialize");
    let parsed = TourConfig::from_json_str(&json).expect("parse");
    assert_eq!(parsed, TourConfig::default());
}

#[test]
fn invalid_values_are_rejected() {
    let err = TourConfig::from_toml_str("card_height = -1.0").unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref errs) if errs.len() == 1));
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = TourConfig::from_toml_str("margin = ").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)));
}

#[test]
fn load_picks_format_from_extension() {
    let dir = tempfile::tempdir().expect("tempdir");

    let toml_path = dir.path().join("waypoint.toml");
    let mut file = std::fs::File::create(&toml_path).expect("create");
    writeln!(file, "highlight_padding = 4.0").expect("write");
    let config = TourConfig::load(&toml_path).expect("load toml");
    assert_eq!(config.highlight_padding, 4.0);

    let json_path = dir.path().join("waypoint.json");
    std::fs::write(&json_path, r#"{"card_width": 300.0}"#).expect("write json");
    let config = TourConfig::load(&json_path).expect("load json");
    assert_eq!(config.card_width, 300.0);

    let yaml_path = dir.path().join("waypoint.yaml");
    std::fs::write(&yaml_path, "margin: 3").expect("write yaml");
    let err = TourConfig::load(&yaml_path).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::UnsupportedFormat { extension: Some(ref ext) } if ext == "yaml"
    ));
}

#[test]
fn missing_file_is_io_error() {
    let err = TourConfig::load("/definitely/not/here/waypoint.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
