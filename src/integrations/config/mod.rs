use std::fs::OpenOptions;
use std::io::Write;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::CONFIG_FILE;

/// Used when neither the command line, the environment nor the config file names an API.
pub const DEFAULT_API_URL: &str = "http://localhost:4000";
pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Expands environment variables in a string value.
/// Supports ${VAR} and $VAR syntax.
pub fn expand_env_vars(value: &str) -> Result<String> {
    shellexpand::env(value)
        .map(|s| s.into_owned())
        .map_err(|e| anyhow::anyhow!("Failed to expand environment variable in '{}': {}", value, e))
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct LinkrsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(skip)]
    pub path: Option<PathBuf>,
}

impl LinkrsConfig {
    /// Creates a config with every field unset, pointing at the default config file.
    pub fn new() -> Self {
        Self {
            path: Some(CONFIG_FILE.as_path().to_path_buf()),
            ..Self::default()
        }
    }

    pub fn from_file(config_path: Option<&PathBuf>) -> Result<Self> {
        let path = config_path.cloned().unwrap_or_else(|| {
            let default_path = CONFIG_FILE.as_path().to_path_buf();
            info!("Using configuration path: {}", default_path.display());
            default_path
        });

        // A missing file is not an error: everything falls back to defaults
        let toml_config = std::fs::read_to_string(&path).unwrap_or_default();
        let mut config = Self::from_str(&toml_config)
            .with_context(|| format!("Invalid configuration file {}", path.display()))?;
        config.path = Some(path);
        Ok(config)
    }

    pub fn from_str(config: &str) -> Result<Self> {
        let config: LinkrsConfig = toml::from_str(config)?;
        if config.page_size == Some(0) {
            anyhow::bail!("page_size must be greater than 0");
        }
        info!(
            "Loaded config: api_url={:?}, page_size={:?}",
            config.api_url, config.page_size
        );
        Ok(config)
    }

    /// Resolve the API base URL.
    ///
    /// Precedence: `override_url` (command line flag or `LINKRS_API_URL`), then the
    /// `api_url` from the config file, then [`DEFAULT_API_URL`].
    pub fn resolve_api_url(&self, override_url: Option<&str>) -> Result<String> {
        let raw = override_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .or(self.api_url.as_deref())
            .unwrap_or(DEFAULT_API_URL);
        let expanded = expand_env_vars(raw)?;
        Url::parse(&expanded).with_context(|| format!("Invalid API URL: {expanded}"))?;
        Ok(expanded)
    }

    pub fn page_size(&self) -> NonZeroUsize {
        self.page_size
            .and_then(NonZeroUsize::new)
            .or(NonZeroUsize::new(DEFAULT_PAGE_SIZE))
            .unwrap_or(NonZeroUsize::MIN)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn to_str(&self) -> Result<String> {
        toml::to_string(self).map_err(std::convert::Into::into)
    }

    pub fn write_to_file(&self) -> Result<()> {
        let path = self
            .path
            .clone()
            .unwrap_or(CONFIG_FILE.as_path().to_path_buf());

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // Set restrictive file permissions on Unix systems (0600 = rw-------)
        #[cfg(unix)]
        let mut file = {
            use std::os::unix::fs::OpenOptionsExt;
            OpenOptions::new()
                .write(true)
                .truncate(true)
                .create(true)
                .mode(0o600)
                .open(&path)?
        };

        #[cfg(not(unix))]
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(&path)?;

        file.write_all(self.to_str()?.as_bytes())?;
        info!("Wrote configuration to {}", path.display());
        Ok(())
    }
}
