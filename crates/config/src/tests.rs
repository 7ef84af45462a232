use std::fs;
use std::path::PathBuf;

use crate::AppConfig;

fn temp_config_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sig-config-{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_defaults_without_files() {
    let dir = temp_config_dir();
    let config = AppConfig::load_files(dir.to_str().unwrap(), "development").unwrap();

    assert_eq!(config.app_name, "sig-portal");
    assert!(config.is_development());
    assert_eq!(config.telemetry.log_level, "info");
    assert_eq!(config.session.key, "sig_user");
    assert_eq!(config.portal.min_credential_digits, 11);
    assert!(config.portal.seed_document.is_none());
}

#[test]
fn test_env_file_overrides_default_file() {
    let dir = temp_config_dir();
    fs::write(
        dir.join("default.toml"),
        r#"
app_name = "sig-araguaina"

[telemetry]
log_level = "debug"

[session]
key = "portal_user"
"#,
    )
    .unwrap();
    fs::write(
        dir.join("production.toml"),
        r#"
app_env = "production"

[telemetry]
log_level = "warn"
"#,
    )
    .unwrap();

    let config = AppConfig::load_files(dir.to_str().unwrap(), "production").unwrap();

    assert_eq!(config.app_name, "sig-araguaina");
    assert!(config.is_production());
    assert_eq!(config.telemetry.log_level, "warn");
    assert_eq!(config.session.key, "portal_user");
}

#[test]
fn test_invalid_toml_type_is_error() {
    let dir = temp_config_dir();
    fs::write(
        dir.join("default.toml"),
        "[portal]\nmin_credential_digits = \"eleven\"\n",
    )
    .unwrap();

    assert!(AppConfig::load_files(dir.to_str().unwrap(), "development").is_err());
}
