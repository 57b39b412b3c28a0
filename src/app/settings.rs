use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::data::provider::ProviderSpec;

const API_KEY_VAR: &str = "DARKSKY_API_KEY";
const LEGACY_API_KEY_VAR: &str = "DARKSKI_API_KEY";
const CONFIG_DIR_VAR: &str = "WEATHER_ORB_CONFIG_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading provider settings at {path} failed: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("provider settings at {path} are malformed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("provider settings at {path} list no providers")]
    NoProviders { path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    pub providers: Vec<ProviderSpec>,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            providers: vec![ProviderSpec::darksky()],
        }
    }
}

/// Provider list from the settings file, or the built-in default when there
/// is no file.
pub fn load_provider_settings() -> Result<(ProviderSettings, Option<PathBuf>), ConfigError> {
    let Some(path) = settings_path_from(
        std::env::var_os(CONFIG_DIR_VAR),
        std::env::var_os("HOME"),
    ) else {
        return Ok((ProviderSettings::default(), None));
    };
    let settings = load_provider_settings_from(&path)?;
    Ok((settings, Some(path)))
}

pub fn load_provider_settings_from(path: &Path) -> Result<ProviderSettings, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no provider settings file, using defaults");
            return Ok(ProviderSettings::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let settings: ProviderSettings =
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    if settings.providers.is_empty() {
        return Err(ConfigError::NoProviders {
            path: path.to_path_buf(),
        });
    }
    Ok(settings)
}

pub fn api_key_from_env() -> String {
    resolve_api_key(
        std::env::var(API_KEY_VAR).ok(),
        std::env::var(LEGACY_API_KEY_VAR).ok(),
    )
    .unwrap_or_else(|| {
        warn!("{API_KEY_VAR} is not set; provider calls will likely be rejected");
        String::new()
    })
}

#[must_use]
pub fn resolve_api_key(primary: Option<String>, legacy: Option<String>) -> Option<String> {
    primary
        .filter(|key| !key.is_empty())
        .or_else(|| legacy.filter(|key| !key.is_empty()))
}

#[must_use]
pub fn settings_path_from(config_dir: Option<OsString>, home: Option<OsString>) -> Option<PathBuf> {
    if let Some(base) = config_dir {
        return Some(PathBuf::from(base).join("providers.json"));
    }

    let home = home?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("weather-orb")
            .join("providers.json"),
    )
}

#[cfg(test)]
mod tests;
