//! Error type shared by every core operation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, InjectError>;

#[derive(Debug, Error)]
pub enum InjectError {
    /// The URL does not match `scheme://host[:port][rest]`.
    #[error("malformed URL '{url}'")]
    MalformedUrl { url: String },

    /// No cache-root rule exists for this operating system.
    #[error("unsupported platform '{os}': cannot determine the Deno cache directory (set DENO_DIR)")]
    UnsupportedPlatform { os: String },

    /// The platform is supported but the variables its rule needs are missing.
    #[error("cannot determine the Deno cache directory: {reason}")]
    CacheRootUnavailable { reason: String },

    #[error("{} is not a directory", .path.display())]
    NotADirectory { path: PathBuf },

    /// A relative source path that cannot be turned into URL text without loss.
    #[error("path is not valid UTF-8: {}", .path.display())]
    NonUtf8Path { path: PathBuf },

    #[error("{op} {}: {source}", .path.display())]
    Filesystem {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("sidecar encoding failed: {0}")]
    Sidecar(#[from] serde_json::Error),

    #[error("slot worker failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl InjectError {
    /// Wraps an I/O error with the operation and path it happened on.
    pub fn fs(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        InjectError::Filesystem {
            op,
            path: path.into(),
            source,
        }
    }
}
