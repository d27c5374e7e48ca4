use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DEFAULT_TITLE: &str = "Bigscreen";
const DEFAULT_REFRESH_SECS: u64 = 2;
const DEFAULT_WIDE_BREAKPOINT: u16 = 80;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Minimum panel width (columns) for side-by-side sections
    #[serde(default = "default_wide_breakpoint")]
    pub wide_breakpoint: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            wide_breakpoint: DEFAULT_WIDE_BREAKPOINT,
        }
    }
}

/// Hex color overrides ("#RRGGBB" or "#RGB"), unset keys use the built-in palette
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ThemeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_dim: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inactive: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Bigscreen header title
    #[serde(default = "default_title")]
    pub title: String,

    /// How often a request file is re-read
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[serde(default)]
    pub theme: ThemeConfig,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_refresh_secs() -> u64 {
    DEFAULT_REFRESH_SECS
}

fn default_wide_breakpoint() -> u16 {
    DEFAULT_WIDE_BREAKPOINT
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            refresh_secs: DEFAULT_REFRESH_SECS,
            layout: LayoutConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("bigscreen-notes");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(AppConfig::default()),
        };

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return Ok(config),
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
            // Leave a broken file in place for the user to fix
            return Ok(AppConfig::default());
        }

        let config = AppConfig::default();
        if let Err(e) = config.save() {
            tracing::warn!("Failed to write default config: {}", e);
        }
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = toml::to_string_pretty(&self.normalized())?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Clamp values that would stall the reload tick or hide the panel
    pub fn normalized(&self) -> Self {
        let mut config = self.clone();
        if config.refresh_secs == 0 {
            config.refresh_secs = DEFAULT_REFRESH_SECS;
        }
        if config.title.trim().is_empty() {
            config.title = default_title();
        }
        config
    }
}
