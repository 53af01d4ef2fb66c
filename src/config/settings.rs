use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

fn default_city() -> String {
    "Kozhikode".to_string()
}
fn default_geolocation_timeout_secs() -> u64 {
    5
}
fn default_timings_base_url() -> String {
    "https://api.aladhan.com".to_string()
}
fn default_geocode_base_url() -> String {
    "https://api.bigdatacloud.net".to_string()
}
fn default_geolocation_url() -> String {
    "https://ipapi.co/json/".to_string()
}
fn default_request_timeout_secs() -> u64 {
    10
}
fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// City used when there is no saved preference. Looked up by name in the
    /// bundled city table.
    #[serde(default = "default_city")]
    pub default_city: String,
    /// Try geolocation when neither the saved preference nor the default
    /// city resolves. Otherwise go straight to manual selection.
    #[serde(default = "default_true")]
    pub detect_when_unresolved: bool,
    #[serde(default = "default_geolocation_timeout_secs")]
    pub geolocation_timeout_secs: u64,
    /// Drop the displayed timings as soon as a different country is picked.
    #[serde(default)]
    pub clear_results_on_country_change: bool,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            default_city: default_city(),
            detect_when_unresolved: true,
            geolocation_timeout_secs: default_geolocation_timeout_secs(),
            clear_results_on_country_change: false,
        }
    }
}

impl LocationConfig {
    pub fn geolocation_timeout(&self) -> Duration {
        Duration::from_secs(self.geolocation_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_timings_base_url")]
    pub timings_base_url: String,
    #[serde(default = "default_geocode_base_url")]
    pub geocode_base_url: String,
    #[serde(default = "default_geolocation_url")]
    pub geolocation_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            timings_base_url: default_timings_base_url(),
            geocode_base_url: default_geocode_base_url(),
            geolocation_url: default_geolocation_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DisplayConfig {
    /// Days to add/subtract from the locally computed Hijri date. Only used
    /// when the timings API does not send one.
    #[serde(default)]
    pub hijri_offset: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub location: LocationConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "waqt").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn db_path() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("waqt.db"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("Reading {:?}", path))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Parsing config.toml")
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Serializing config")
    }

    pub fn ensure_data_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?;
        std::fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
