//! `dci locate <URL>` – print the cache file a URL maps to.

use anyhow::Result;
use dci_core::cache_slot;
use dci_core::deno_dir::CacheRootProvider;

pub fn run_locate(roots: &(dyn CacheRootProvider + Send + Sync), url: &str) -> Result<()> {
    let slot = cache_slot::locate(roots, url)?;
    tracing::debug!(metadata = %slot.metadata_path().display(), "located {}", url);
    println!("{}", slot.destination().display());
    Ok(())
}
