//! URL decomposition into the parts Deno keys its cache on.
//!
//! Parsing is purely syntactic. The host keeps its original case and the
//! remainder keeps every byte (query, fragment, percent escapes), because the
//! cache digest is computed over exactly what Deno saw.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{InjectError, Result};

/// `scheme://host[:port][rest]`, anchored at the start; `rest` runs to the end of input.
static URL_GRAMMAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^([A-Za-z0-9_]+)://([^:/]+)(?::([0-9]+))?(.*)$").expect("URL grammar is valid")
});

/// A URL split into scheme, host, optional port and path remainder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScriptLocation {
    pub scheme: String,
    pub host: String,
    /// Digits only, without the leading `:`. `None` means the scheme default.
    pub port: Option<String>,
    /// Everything after host and port, including the leading `/` (may be empty).
    pub path_remainder: String,
}

impl ScriptLocation {
    /// Parses `url`, failing with [`InjectError::MalformedUrl`] when it lacks a scheme or host.
    pub fn parse(url: &str) -> Result<Self> {
        let caps = URL_GRAMMAR
            .captures(url)
            .ok_or_else(|| InjectError::MalformedUrl {
                url: url.to_string(),
            })?;

        Ok(Self {
            scheme: caps[1].to_string(),
            host: caps[2].to_string(),
            port: caps.get(3).map(|m| m.as_str().to_string()),
            path_remainder: caps
                .get(4)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        })
    }

    /// Host directory name inside `deps/<scheme>/`: `host` or `host_PORT<port>`.
    pub fn host_dir(&self) -> String {
        match &self.port {
            Some(port) => format!("{}_PORT{}", self.host, port),
            None => self.host.clone(),
        }
    }
}

impl fmt::Display for ScriptLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.host)?;
        if let Some(port) = &self.port {
            write!(f, ":{}", port)?;
        }
        f.write_str(&self.path_remainder)
    }
}

/// Free-function form of [`ScriptLocation::parse`].
pub fn decompose(url: &str) -> Result<ScriptLocation> {
    ScriptLocation::parse(url)
}
