use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use crate::domain::errors::StorageError;
use crate::domain::ports::LocalStorage;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const DARK_MODE_KEY: &str = "darkMode";

// Claims we read from the access token for display purposes only.
#[derive(Debug, Deserialize)]
struct DisplayClaims {
    username: Option<String>,
    sub: Option<String>,
}

/// Token pair of a logged-in user.
///
/// Presence of both tokens is all that is checked; expiry and signatures are the backend's
/// concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
}

impl Session {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }

    pub fn load(storage: &dyn LocalStorage) -> Result<Option<Self>, StorageError> {
        let access = storage.get(ACCESS_TOKEN_KEY)?.filter(|t| !t.is_empty());
        let refresh = storage.get(REFRESH_TOKEN_KEY)?.filter(|t| !t.is_empty());
        Ok(match (access, refresh) {
            (Some(access), Some(refresh)) => Some(Self::new(access, refresh)),
            _ => None,
        })
    }

    pub fn persist(&self, storage: &dyn LocalStorage) -> Result<(), StorageError> {
        storage.set(ACCESS_TOKEN_KEY, &self.access_token)?;
        storage.set(REFRESH_TOKEN_KEY, &self.refresh_token)
    }

    pub fn clear(storage: &dyn LocalStorage) -> Result<(), StorageError> {
        storage.remove(ACCESS_TOKEN_KEY)?;
        storage.remove(REFRESH_TOKEN_KEY)
    }

    /// Display name decoded from the access token payload (`username`, else `sub`).
    pub fn username(&self) -> Option<String> {
        let payload = self.access_token.split('.').nth(1)?;
        let bytes = match URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::error!(error = %err, "failed to decode access token payload");
                return None;
            }
        };
        match serde_json::from_slice::<DisplayClaims>(&bytes) {
            Ok(claims) => claims.username.or(claims.sub),
            Err(err) => {
                tracing::error!(error = %err, "failed to parse access token claims");
                None
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn load(storage: &dyn LocalStorage) -> Result<Self, StorageError> {
        let dark = storage.get(DARK_MODE_KEY)?.as_deref() == Some("true");
        Ok(if dark { Theme::Dark } else { Theme::Light })
    }

    pub fn persist(&self, storage: &dyn LocalStorage) -> Result<(), StorageError> {
        storage.set(DARK_MODE_KEY, if self.is_dark() { "true" } else { "false" })
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}
