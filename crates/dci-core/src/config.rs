use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::inject::{Action, InjectOptions};
use crate::walk;

fn default_jobs() -> usize {
    1
}

/// Global configuration loaded from `~/.config/dci/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DciConfig {
    /// Deno dir used when `DENO_DIR` is not set (None = platform default).
    #[serde(default)]
    pub deno_dir: Option<PathBuf>,
    /// Extensions of the files substituted into the cache.
    #[serde(default = "walk::default_extensions")]
    pub extensions: Vec<String>,
    /// Cache slots processed concurrently.
    #[serde(default = "default_jobs")]
    pub jobs: usize,
    /// Continue past per-file failures and report them at the end.
    #[serde(default)]
    pub keep_going: bool,
}

impl Default for DciConfig {
    fn default() -> Self {
        Self {
            deno_dir: None,
            extensions: walk::default_extensions(),
            jobs: default_jobs(),
            keep_going: false,
        }
    }
}

impl DciConfig {
    /// Injection options for `action`, seeded from this config.
    pub fn inject_options(&self, action: Action) -> InjectOptions {
        InjectOptions {
            action,
            jobs: self.jobs.max(1),
            keep_going: self.keep_going,
            extensions: self.extensions.clone(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dci")?;
    xdg_dirs
        .place_config_file("config.toml")
        .context("config directory")
}

/// Load configuration from disk, creating a default file if none exists.
///
/// Failing to create the default file is not fatal: the defaults are used and a
/// warning is logged. A file that exists but cannot be read or parsed is an error.
pub fn load_or_init() -> Result<DciConfig> {
    match config_path() {
        Ok(path) => load_or_init_at(&path),
        Err(e) => {
            tracing::warn!("config directory unavailable, using defaults: {:#}", e);
            Ok(DciConfig::default())
        }
    }
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<DciConfig> {
    if !path.exists() {
        let default_cfg = DciConfig::default();
        match write_default(path, &default_cfg) {
            Ok(()) => tracing::info!("created default config at {}", path.display()),
            Err(e) => tracing::warn!("using default config: {:#}", e),
        }
        return Ok(default_cfg);
    }

    let data =
        fs::read_to_string(path).with_context(|| format!("config {}", path.display()))?;
    let cfg: DciConfig =
        toml::from_str(&data).with_context(|| format!("config {}", path.display()))?;
    Ok(cfg)
}

fn write_default(path: &Path, cfg: &DciConfig) -> Result<()> {
    let toml = toml::to_string_pretty(cfg)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("config {}", parent.display()))?;
    }
    fs::write(path, toml).with_context(|| format!("config {}", path.display()))?;
    Ok(())
}
