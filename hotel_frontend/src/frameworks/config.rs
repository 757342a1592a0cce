use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::domain::criteria::ResultAccumulation;

pub const DEFAULT_CONFIG_FILE: &str = "hotel_frontend.toml";
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_SIGNUP_REDIRECT_MS: u64 = 1_000;
const FALLBACK_STORAGE_FILE: &str = ".hotel_storage.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

// Optional keys of the TOML config file; environment variables win over them.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    pub api_url: Option<String>,
    pub request_timeout_ms: Option<u64>,
    pub storage_path: Option<PathBuf>,
    pub results_mode: Option<String>,
    pub signup_redirect_ms: Option<u64>,
}

impl FileSettings {
    pub fn parse(path: &Path, text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    // A missing file is only an error when it was asked for explicitly.
    fn load(path: &Path, required: bool) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(path, &text),
            Err(err) if err.kind() == ErrorKind::NotFound && !required => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Runtime settings of the `hotel` CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub request_timeout: Duration,
    pub storage_path: PathBuf,
    pub results_mode: ResultAccumulation,
    pub signup_redirect: Duration,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    /// Resolves settings from a key lookup (normally the process environment).
    ///
    /// `HOTEL_CONFIG` names the TOML file; without it `hotel_frontend.toml` is read when present.
    pub fn resolve(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let file = match lookup("HOTEL_CONFIG") {
            Some(path) => FileSettings::load(Path::new(&path), true)?,
            None => FileSettings::load(Path::new(DEFAULT_CONFIG_FILE), false)?,
        };
        Self::merge(file, lookup)
    }

    pub fn merge(
        file: FileSettings,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let api_url = lookup("HOTEL_API_URL")
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_ms = match lookup("HOTEL_API_TIMEOUT_MS") {
            Some(raw) => parse_millis("HOTEL_API_TIMEOUT_MS", &raw)?,
            None => file.request_timeout_ms.unwrap_or(DEFAULT_TIMEOUT_MS),
        };

        let storage_path = lookup("HOTEL_STORAGE_PATH")
            .map(PathBuf::from)
            .or(file.storage_path)
            .unwrap_or_else(default_storage_path);

        let results_mode = match lookup("HOTEL_RESULTS_MODE").or(file.results_mode) {
            Some(raw) => raw
                .parse::<ResultAccumulation>()
                .map_err(|err| ConfigError::InvalidValue("HOTEL_RESULTS_MODE".to_string(), err))?,
            None => ResultAccumulation::default(),
        };

        let redirect_ms = match lookup("HOTEL_SIGNUP_REDIRECT_MS") {
            Some(raw) => parse_millis("HOTEL_SIGNUP_REDIRECT_MS", &raw)?,
            None => file.signup_redirect_ms.unwrap_or(DEFAULT_SIGNUP_REDIRECT_MS),
        };

        Ok(Self {
            api_url,
            request_timeout: Duration::from_millis(timeout_ms),
            storage_path,
            results_mode,
            signup_redirect: Duration::from_millis(redirect_ms),
        })
    }
}

fn parse_millis(key: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|err| ConfigError::InvalidValue(key.to_string(), err.to_string()))
}

pub fn default_storage_path() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("hotel_frontend").join("storage.json"))
        .unwrap_or_else(|| PathBuf::from(FALLBACK_STORAGE_FILE))
}
