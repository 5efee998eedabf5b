//! Integration tests for configuration loading.

use std::io::Write;

use tempfile::NamedTempFile;
use tvsort::config::{load_config, load_config_or_default, parse_config, Config};

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn empty_file_is_default() {
    let file = write_config("");
    let config = load_config(file.path()).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.matcher.max_chaff_prefix, 10);
    assert!(!config.logging.verbose);
}

#[test]
fn partial_matcher_section() {
    let file = write_config(
        r#"
[matcher]
max_chaff_prefix = 16
suggestion_factor = 3.0

[logging]
verbose = true
filter = "tvsort_matcher=trace"
"#,
    );
    let config = load_config(file.path()).unwrap();
    assert_eq!(config.matcher.max_chaff_prefix, 16);
    assert_eq!(config.matcher.suggestion_factor, 3.0);
    assert_eq!(config.matcher.max_ignored_leftover, 12);
    assert_eq!(config.matcher.date_years(), 1900..3000);
    assert!(config.logging.verbose);
    assert_eq!(config.logging.filter.as_deref(), Some("tvsort_matcher=trace"));
}

#[test]
fn invalid_values_rejected() {
    let err = parse_config("[matcher]\nmin_date_year = 2000\nmax_date_year = 1999\n").unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("Invalid [matcher] section"), "{message}");
    assert!(message.contains("date year range"), "{message}");
}

#[test]
fn malformed_toml_rejected() {
    let file = write_config("[matcher\nmax_chaff_prefix = ");
    let err = load_config(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to parse config"));
}

#[test]
fn missing_explicit_path_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = load_config_or_default(Some(path.as_path())).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn explicit_path_wins() {
    let file = write_config("[matcher]\nmax_extension_len = 3\n");
    let config = load_config_or_default(Some(file.path())).unwrap();
    assert_eq!(config.matcher.max_extension_len, 3);
}

#[test]
fn round_trips_through_toml() {
    let mut config = Config::default();
    config.matcher.max_ignored_leftover = 20;
    config.logging.filter = Some("tvsort=info".into());

    let text = toml::to_string(&config).unwrap();
    assert_eq!(parse_config(&text).unwrap(), config);
}
