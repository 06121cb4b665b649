use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::audio::AudioConfig;
use self::dictionary::DictionaryConfig;
use self::remote::RemoteConfig;

pub mod audio;
pub mod dictionary;
pub mod remote;

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub remote: RemoteConfig,
    pub dictionary: DictionaryConfig,
    pub audio: AudioConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Config {
    /// Defaults overridden by environment variables
    pub fn new() -> Self {
        Config {
            remote: RemoteConfig::new(),
            dictionary: DictionaryConfig::new(),
            audio: AudioConfig::default(),
        }
    }

    /// Load a JSON profile. Environment variables still win over file values.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading config from {}", path.display());
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config: Config =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| {
                ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                }
            })?;

        config.remote.apply_env();
        config.dictionary.apply_env();
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_profile_falls_back_to_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "remote": { "owner": "me", "repo": "dict" } }"#).unwrap();
        assert_eq!(config.remote.owner, "me");
        assert_eq!(config.remote.branch, "main");
        assert_eq!(config.remote.api_url, "https://api.github.com");
        assert_eq!(config.dictionary.admin_path, "admin/dictionary.admin.json");
        assert_eq!(config.dictionary.search_limit, 50);
        assert_eq!(config.audio.extension, "mp3");
    }

    #[test]
    fn token_is_never_serialized() {
        let mut config = Config::default();
        config.remote.token = Some("secret".into());
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("secret"));
        assert!(!format!("{:?}", config).contains("secret"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Config::from_file(Path::new("/nonexistent/dosh.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/dosh.json"));
    }
}
