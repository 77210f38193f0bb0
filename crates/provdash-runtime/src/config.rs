use crate::{Error, Result};
use provdash_client::ClientConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOG_FILE_NAME: &str = "provdash.log";
/// Reports land in `~/reports` unless configured otherwise.
const DEFAULT_REPORT_SUBDIR: &str = "reports";

/// Resolve the provdash data directory based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. PROVDASH_PATH environment variable (with tilde expansion)
/// 3. XDG data directory (recommended default)
/// 4. ~/.provdash (fallback for systems without XDG)
pub fn resolve_data_dir(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("PROVDASH_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("provdash"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".provdash"));
    }

    Err(Error::Config(
        "Could not determine data directory: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    /// Batch runs and report downloads.
    pub long_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        let client = ClientConfig::default();
        Self {
            base_url: client.base_url,
            timeout_secs: client.timeout.as_secs(),
            long_timeout_secs: client.long_timeout.as_secs(),
        }
    }
}

/// How distributions are drawn in the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartStyle {
    /// Hand-drawn horizontal bars.
    #[default]
    Bars,
    /// ratatui `BarChart`.
    Chart,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub chart_style: ChartStyle,
    pub trend_len: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            chart_style: ChartStyle::Bars,
            trend_len: 5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Where downloaded reports are written; `~/reports` when unset. A
    /// leading `~/` is expanded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(resolve_data_dir(None)?.join(CONFIG_FILE_NAME))
    }

    /// Explicit `--config` file, or `config.toml` in the data directory.
    pub fn resolve_path(explicit: Option<&str>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(expand_tilde(path)),
            None => Self::default_path(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.backend.base_url.trim().is_empty() {
            return Err(Error::Config("backend.base_url must not be empty".to_string()));
        }
        if self.backend.timeout_secs == 0 || self.backend.long_timeout_secs == 0 {
            return Err(Error::Config("backend timeouts must be positive".to_string()));
        }
        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.backend.base_url.clone(),
            timeout: Duration::from_secs(self.backend.timeout_secs),
            long_timeout: Duration::from_secs(self.backend.long_timeout_secs),
        }
    }

    pub fn report_dir(&self) -> PathBuf {
        match &self.report.output_dir {
            Some(dir) => expand_tilde(&dir.to_string_lossy()),
            None => std::env::var_os("HOME")
                .map(|home| PathBuf::from(home).join(DEFAULT_REPORT_SUBDIR))
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}
