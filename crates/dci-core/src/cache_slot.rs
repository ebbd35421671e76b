//! Cache path resolution: where Deno stores the content of a remote URL.
//!
//! Layout under the Deno dir:
//!
//! ```text
//! <deno_dir>/deps/<scheme>/<host>[_PORT<port>]/<sha256(path remainder)>
//! <deno_dir>/deps/<scheme>/<host>[_PORT<port>]/<sha256(path remainder)>.metadata.json
//! ```

use std::path::{Path, PathBuf};

use crate::checksum::sha256_hex;
use crate::deno_dir::CacheRootProvider;
use crate::error::Result;
use crate::location::ScriptLocation;

/// Cache class directory for remote modules.
pub const DEPS_DIR: &str = "deps";

/// Suffix of the metadata file written next to each cached file.
pub const METADATA_SUFFIX: &str = ".metadata.json";

/// Directory and file name of one URL's cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheSlot {
    pub directory: PathBuf,
    /// Lowercase hex SHA-256 of the path remainder bytes.
    pub file_base_name: String,
}

impl CacheSlot {
    /// Resolves the slot for `loc` under `cache_root` (the Deno dir, not its `deps` child).
    /// Pure: nothing is created on disk.
    pub fn resolve(cache_root: &Path, loc: &ScriptLocation) -> Self {
        let directory = cache_root
            .join(DEPS_DIR)
            .join(&loc.scheme)
            .join(loc.host_dir());
        Self {
            directory,
            file_base_name: sha256_hex(loc.path_remainder.as_bytes()),
        }
    }

    /// Path of the cached content file.
    pub fn destination(&self) -> PathBuf {
        self.directory.join(&self.file_base_name)
    }

    /// Path of the metadata sidecar.
    pub fn metadata_path(&self) -> PathBuf {
        self.directory
            .join(format!("{}{}", self.file_base_name, METADATA_SUFFIX))
    }
}

/// Resolves the slot of a single URL under the provider's cache root.
pub fn locate<P: CacheRootProvider + ?Sized>(roots: &P, url: &str) -> Result<CacheSlot> {
    let loc = ScriptLocation::parse(url)?;
    Ok(CacheSlot::resolve(&roots.cache_root()?, &loc))
}
