//! User settings: Radarr/Sonarr base URLs and the theme flag.
//!
//! Content normalization never reads these; the store only sees the
//! backend it is handed.

pub mod backend;
pub mod sqlite;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use backend::{MemoryBackend, SettingsBackend};
pub use sqlite::SqliteBackend;

pub const RADARR_KEY: &str = "watchtonight-radarr-url";
pub const SONARR_KEY: &str = "watchtonight-sonarr-url";
pub const THEME_KEY: &str = "watchtonight-theme";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("db error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Base URLs for the "add to Radarr/Sonarr" buttons. Empty means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrUrls {
    #[serde(default)]
    pub radarr_url: String,
    #[serde(default)]
    pub sonarr_url: String,
}

impl ArrUrls {
    /// Same URLs with trailing slashes stripped.
    pub fn normalized(&self) -> Self {
        Self {
            radarr_url: normalize_base_url(&self.radarr_url),
            sonarr_url: normalize_base_url(&self.sonarr_url),
        }
    }
}

/// Strip every trailing `/`.
pub fn normalize_base_url(value: &str) -> String {
    value.trim_end_matches('/').to_string()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Stored value -> theme; anything unrecognized is the default.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Self::Light,
            Some("dark") => Self::Dark,
            _ => Self::default(),
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed view over a [`SettingsBackend`].
pub struct SettingsStore<B> {
    backend: B,
}

impl<B: SettingsBackend> SettingsStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub async fn arr_urls(&self) -> Result<ArrUrls, SettingsError> {
        Ok(ArrUrls {
            radarr_url: self.backend.get(RADARR_KEY).await?.unwrap_or_default(),
            sonarr_url: self.backend.get(SONARR_KEY).await?.unwrap_or_default(),
        })
    }

    /// Normalize and persist both URLs; returns what was stored.
    pub async fn save_arr_urls(&self, urls: &ArrUrls) -> Result<ArrUrls, SettingsError> {
        let urls = urls.normalized();
        self.backend.set(RADARR_KEY, &urls.radarr_url).await?;
        self.backend.set(SONARR_KEY, &urls.sonarr_url).await?;
        debug!(radarr = %urls.radarr_url, sonarr = %urls.sonarr_url, "saved arr urls");
        Ok(urls)
    }

    pub async fn theme(&self) -> Result<Theme, SettingsError> {
        let stored = self.backend.get(THEME_KEY).await?;
        Ok(Theme::from_stored(stored.as_deref()))
    }

    pub async fn set_theme(&self, theme: Theme) -> Result<(), SettingsError> {
        self.backend.set(THEME_KEY, theme.as_str()).await
    }

    pub async fn toggle_theme(&self) -> Result<Theme, SettingsError> {
        let next = self.theme().await?.toggled();
        self.set_theme(next).await?;
        Ok(next)
    }
}
