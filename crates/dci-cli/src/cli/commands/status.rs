//! `dci status <LIBPATH> <LIBURL>` – show which cache entries hold the local files.

use anyhow::Result;
use dci_core::deno_dir::CacheRootProvider;
use dci_core::status::{inspect, SlotState};
use std::path::Path;

pub fn run_status(
    roots: &(dyn CacheRootProvider + Send + Sync),
    libpath: &Path,
    liburl: &str,
    extensions: &[String],
) -> Result<()> {
    for status in inspect(roots, libpath, liburl, extensions)? {
        let note = if status.state != SlotState::Missing && !status.has_sidecar {
            "  (no metadata)"
        } else {
            ""
        };
        println!("{:<8} {}{}", status.state, status.url, note);
    }
    Ok(())
}
