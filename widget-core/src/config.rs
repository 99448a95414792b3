use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{model::Coordinates, provider::ProviderId, status::DEFAULT_STATUS_DELAY};

/// Configuration for a single weather provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,

    /// Override for the provider's API root, mostly useful for proxies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// City shown when the weather widget opens without a query.
    pub default_city: String,

    /// Position reported by the location button. Absent means unsupported.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinates>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            default_city: "London".to_string(),
            location: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExcuseConfig {
    /// Root of the excuse service API. Absent means the built-in catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    pub status_delay_ms: u64,
}

impl Default for ExcuseConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            status_delay_ms: DEFAULT_STATUS_DELAY.as_millis() as u64,
        }
    }
}

impl ExcuseConfig {
    pub fn status_delay(&self) -> Duration {
        Duration::from_millis(self.status_delay_ms)
    }
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Optional default provider id, "demo" or "openweather". Unset means "demo".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_provider: Option<String>,

    /// Example TOML:
    /// [providers.openweather]
    /// api_key = "..."
    pub providers: HashMap<String, ProviderConfig>,

    pub weather: WeatherConfig,

    pub excuses: ExcuseConfig,
}

impl Config {
    /// Return the default provider as a strongly-typed ProviderId.
    pub fn default_provider_id(&self) -> Result<ProviderId> {
        match self.default_provider.as_deref() {
            Some(s) => ProviderId::try_from(s),
            None => Ok(ProviderId::Demo),
        }
    }

    pub fn provider_config(&self, id: ProviderId) -> Option<&ProviderConfig> {
        self.providers.get(id.as_str())
    }

    /// Store default provider as string.
    pub fn set_default_provider(&mut self, id: ProviderId) {
        self.default_provider = Some(id.as_str().to_string());
    }

    /// Load config from the platform config directory, or defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform config directory.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "widgets", "widget-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Set/replace a provider API key, making it the default when none is chosen yet.
    pub fn upsert_provider_api_key(&mut self, provider_id: ProviderId, api_key: String) {
        let base_url = self
            .provider_config(provider_id)
            .and_then(|cfg| cfg.base_url.clone());
        self.providers
            .insert(provider_id.as_str().to_string(), ProviderConfig { api_key, base_url });

        if self.default_provider.is_none() {
            self.default_provider = Some(provider_id.to_string());
        }
    }

    /// Returns API key for a provider, if present.
    pub fn provider_api_key(&self, provider_id: ProviderId) -> Option<&str> {
        self.provider_config(provider_id).map(|cfg| cfg.api_key.as_str())
    }

    pub fn provider_base_url(&self, provider_id: ProviderId) -> Option<&str> {
        self.provider_config(provider_id)
            .and_then(|cfg| cfg.base_url.as_deref())
    }

    pub fn is_provider_configured(&self, provider_id: ProviderId) -> bool {
        !provider_id.needs_api_key() || self.provider_api_key(provider_id).is_some()
    }
}
