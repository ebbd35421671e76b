//! Cache-root resolution (the Deno dir).
//!
//! Environment access goes through [`EnvSource`] so callers and tests can
//! supply a fixed environment instead of the process one.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{InjectError, Result};

/// Explicit override, honoured on every platform.
pub const DENO_DIR_VAR: &str = "DENO_DIR";

/// Subdirectory of the platform cache home that Deno owns.
const DENO_NAMESPACE: &str = "deno";

/// Anything that can hand out the cache root.
pub trait CacheRootProvider {
    fn cache_root(&self) -> Result<PathBuf>;
}

impl CacheRootProvider for Path {
    fn cache_root(&self) -> Result<PathBuf> {
        Ok(self.to_path_buf())
    }
}

impl CacheRootProvider for PathBuf {
    fn cache_root(&self) -> Result<PathBuf> {
        Ok(self.clone())
    }
}

/// Read access to environment variables.
pub trait EnvSource {
    fn var_os(&self, key: &str) -> Option<OsString>;

    /// Like `var_os`, with empty values treated as unset.
    fn non_empty(&self, key: &str) -> Option<OsString> {
        self.var_os(key).filter(|v| !v.is_empty())
    }
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var_os(&self, key: &str) -> Option<OsString> {
        std::env::var_os(key)
    }
}

impl EnvSource for HashMap<String, String> {
    fn var_os(&self, key: &str) -> Option<OsString> {
        self.get(key).map(OsString::from)
    }
}

/// Platform family; selects which variables and suffix apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
    Windows,
    Other(&'static str),
}

impl Platform {
    pub fn current() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    pub fn from_os(os: &'static str) -> Self {
        match os {
            "linux" => Platform::Linux,
            "macos" => Platform::MacOs,
            "windows" => Platform::Windows,
            other => Platform::Other(other),
        }
    }
}

/// Resolves the Deno dir from the environment:
/// `DENO_DIR`, then the configured directory, then the platform default.
#[derive(Debug, Clone)]
pub struct DenoDir<E> {
    env: E,
    platform: Platform,
    configured: Option<PathBuf>,
}

impl DenoDir<ProcessEnv> {
    /// Process environment on the running platform.
    pub fn from_process() -> Self {
        Self::new(ProcessEnv, Platform::current())
    }
}

impl<E: EnvSource> DenoDir<E> {
    pub fn new(env: E, platform: Platform) -> Self {
        Self {
            env,
            platform,
            configured: None,
        }
    }

    /// Directory from the config file; used when `DENO_DIR` is not set.
    pub fn with_configured(mut self, dir: Option<PathBuf>) -> Self {
        self.configured = dir;
        self
    }

    fn platform_default(&self) -> Result<PathBuf> {
        let home = || {
            self.env
                .non_empty("HOME")
                .map(PathBuf::from)
                .ok_or_else(|| InjectError::CacheRootUnavailable {
                    reason: "HOME is not set".to_string(),
                })
        };

        let cache_home = match self.platform {
            Platform::Linux => match self.env.non_empty("XDG_CACHE_HOME") {
                Some(dir) => PathBuf::from(dir),
                None => home()?.join(".cache"),
            },
            Platform::MacOs => home()?.join("Library").join("Caches"),
            Platform::Windows => self
                .env
                .non_empty("LOCALAPPDATA")
                .map(PathBuf::from)
                .ok_or_else(|| InjectError::CacheRootUnavailable {
                    reason: "LOCALAPPDATA is not set".to_string(),
                })?,
            Platform::Other(os) => {
                return Err(InjectError::UnsupportedPlatform { os: os.to_string() })
            }
        };

        Ok(cache_home.join(DENO_NAMESPACE))
    }
}

impl<E: EnvSource> CacheRootProvider for DenoDir<E> {
    fn cache_root(&self) -> Result<PathBuf> {
        if let Some(dir) = self.env.non_empty(DENO_DIR_VAR) {
            return Ok(PathBuf::from(dir));
        }
        if let Some(dir) = &self.configured {
            return Ok(dir.clone());
        }
        self.platform_default()
    }
}
