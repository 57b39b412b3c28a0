use std::{ffi::OsString, fs, path::PathBuf};

use super::{
    ConfigError, ProviderSettings, load_provider_settings_from, resolve_api_key,
    settings_path_from,
};
use crate::data::provider::ProviderSpec;

#[test]
fn missing_file_falls_back_to_darksky() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let path = temp_dir.path().join("providers.json");

    let settings = load_provider_settings_from(&path).expect("defaults");

    assert_eq!(settings, ProviderSettings::default());
    assert_eq!(settings.providers, vec![ProviderSpec::darksky()]);
}

#[test]
fn settings_file_overrides_providers() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let path = temp_dir.path().join("providers.json");
    let saved = ProviderSettings {
        providers: vec![
            ProviderSpec::darksky(),
            ProviderSpec::new(
                "openWeatherMap",
                "https://api.openweathermap.org/data/2.5/weather?lat={lat}&lon={lon}&appid={api_key}",
            ),
        ],
    };
    fs::write(&path, serde_json::to_string_pretty(&saved).expect("serialize"))
        .expect("write settings");

    let loaded = load_provider_settings_from(&path).expect("load settings");

    assert_eq!(loaded, saved);
}

#[test]
fn malformed_file_is_an_error() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let path = temp_dir.path().join("providers.json");
    fs::write(&path, "{ not json").expect("write settings");

    let err = load_provider_settings_from(&path).expect_err("malformed");
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn empty_provider_list_is_rejected() {
    let temp_dir = tempfile::tempdir().expect("create temp dir");
    let path = temp_dir.path().join("providers.json");
    fs::write(&path, r#"{"providers":[]}"#).expect("write settings");

    let err = load_provider_settings_from(&path).expect_err("empty");
    assert!(matches!(err, ConfigError::NoProviders { .. }));
}

#[test]
fn config_dir_override_wins_over_home() {
    let path = settings_path_from(
        Some(OsString::from("/tmp/orb")),
        Some(OsString::from("/home/someone")),
    );
    assert_eq!(path, Some(PathBuf::from("/tmp/orb/providers.json")));

    let path = settings_path_from(None, Some(OsString::from("/home/someone")));
    assert_eq!(
        path,
        Some(PathBuf::from("/home/someone/.config/weather-orb/providers.json"))
    );

    assert_eq!(settings_path_from(None, None), None);
}

#[test]
fn api_key_prefers_primary_variable() {
    assert_eq!(
        resolve_api_key(Some("new".into()), Some("old".into())),
        Some("new".to_string())
    );
    assert_eq!(
        resolve_api_key(Some(String::new()), Some("old".into())),
        Some("old".to_string())
    );
    assert_eq!(resolve_api_key(None, None), None);
}
