//! Installer configuration loaded from an optional TOML file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::environment::{DEFAULT_PYSPARK_PYTHON, DEFAULT_SPARK_OPTS};
use crate::core::release::DEFAULT_ARCHIVE_BASE_URL;

/// Installer configuration (TOML).
///
/// Every field is optional in the file; missing fields fall back to the
/// values the hosted runners expect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InstallerConfig {
    /// Mirror root used to build the download URL when `spark-url` is unset.
    pub archive_base_url: String,

    /// Value of `PYSPARK_PYTHON` and `PYSPARK_DRIVER_PYTHON`.
    pub pyspark_python: String,

    /// Value of `SPARK_OPTS`.
    pub spark_opts: String,

    /// Whole-request timeout for HTTP downloads.
    pub download_timeout_secs: u64,

    /// Overrides `RUNNER_TOOL_CACHE`.
    pub tool_cache_dir: Option<PathBuf>,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            archive_base_url: DEFAULT_ARCHIVE_BASE_URL.to_string(),
            pyspark_python: DEFAULT_PYSPARK_PYTHON.to_string(),
            spark_opts: DEFAULT_SPARK_OPTS.to_string(),
            download_timeout_secs: 10 * 60,
            tool_cache_dir: None,
        }
    }
}

impl InstallerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.archive_base_url.trim().is_empty() {
            return Err(anyhow!("archive_base_url must not be empty"));
        }
        Url::parse(&self.archive_base_url)
            .with_context(|| format!("archive_base_url is not a URL: {}", self.archive_base_url))?;
        if self.pyspark_python.trim().is_empty() {
            return Err(anyhow!("pyspark_python must not be empty"));
        }
        if self.download_timeout_secs == 0 {
            return Err(anyhow!("download_timeout_secs must be > 0"));
        }
        Ok(())
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}

/// Load config from a TOML file.
///
/// If `path` is `None`, returns `InstallerConfig::default()`. A path that was
/// named explicitly must exist.
pub fn load_config(path: Option<&Path>) -> Result<InstallerConfig> {
    let Some(path) = path else {
        let cfg = InstallerConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    };
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: InstallerConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
