//! Read-only inspection of what the cache currently holds for a local tree.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::checksum::sha256_path;
use crate::deno_dir::CacheRootProvider;
use crate::error::{InjectError, Result};
use crate::inject::build_plan;
use crate::walk;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// Symlink to the local file.
    Linked,
    /// Regular file with the same bytes as the local file.
    Copied,
    /// Occupied by something else (e.g. the original download).
    Stale,
    /// Nothing cached for this URL.
    Missing,
}

impl fmt::Display for SlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            SlotState::Linked => "linked",
            SlotState::Copied => "copied",
            SlotState::Stale => "stale",
            SlotState::Missing => "missing",
        })
    }
}

#[derive(Debug, Clone)]
pub struct SlotStatus {
    pub url: String,
    pub destination: PathBuf,
    pub state: SlotState,
    pub has_sidecar: bool,
}

/// Reports the slot state of every script under `target_dir`.
pub fn inspect<P: CacheRootProvider + ?Sized>(
    roots: &P,
    target_dir: &Path,
    url_prefix: &str,
    extensions: &[String],
) -> Result<Vec<SlotStatus>> {
    let cache_root = roots.cache_root()?;
    let root = walk::source_root(target_dir)?;

    build_plan(&cache_root, &root, url_prefix, extensions)?
        .into_iter()
        .map(|p| -> Result<SlotStatus> {
            let destination = p.slot.destination();
            let state = classify(&p.source.path, &destination)?;
            Ok(SlotStatus {
                has_sidecar: p.slot.metadata_path().is_file(),
                url: p.url,
                destination,
                state,
            })
        })
        .collect()
}

fn classify(source: &Path, dest: &Path) -> Result<SlotState> {
    let meta = match fs::symlink_metadata(dest) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(SlotState::Missing),
        Err(e) => return Err(InjectError::fs("stat", dest, e)),
    };

    if meta.file_type().is_symlink() {
        let target = fs::read_link(dest).map_err(|e| InjectError::fs("read link", dest, e))?;
        return Ok(if target.as_path() == source {
            SlotState::Linked
        } else {
            SlotState::Stale
        });
    }

    if meta.is_file() && sha256_path(dest)? == sha256_path(source)? {
        return Ok(SlotState::Copied);
    }
    Ok(SlotState::Stale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inject::{inject, Action, InjectOptions};
    use crate::walk::default_extensions;

    const PREFIX: &str = "https://deno.land/x/lib@v1";

    fn states(cache: &Path, src: &Path) -> Vec<(String, SlotState, bool)> {
        inspect(&cache.to_path_buf(), src, PREFIX, &default_extensions())
            .unwrap()
            .into_iter()
            .map(|s| (s.url, s.state, s.has_sidecar))
            .collect()
    }

    #[tokio::test]
    async fn missing_then_copied_then_stale() {
        let cache = tempfile::tempdir().unwrap();
        let src = tempfile::tempdir().unwrap();
        fs::write(src.path().join("mod.ts"), "export {};").unwrap();
        let url = format!("{PREFIX}/mod.ts");

        assert_eq!(
            states(cache.path(), src.path()),
            vec![(url.clone(), SlotState::Missing, false)]
        );

        let root = cache.path().to_path_buf();
        inject(&root, src.path(), PREFIX, &InjectOptions::default())
            .await
            .unwrap();
        assert_eq!(
            states(cache.path(), src.path()),
            vec![(url.clone(), SlotState::Copied, true)]
        );

        fs::write(src.path().join("mod.ts"), "export const edited = 1;").unwrap();
        assert_eq!(
            states(cache.path(), src.path()),
            vec![(url, SlotState::Stale, true)]
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn linked() {
        let cache = tempfile::tempdir().unwrap();
        let src = tempfile::tempdir().unwrap();
        fs::write(src.path().join("mod.ts"), "export {};").unwrap();

        let root = cache.path().to_path_buf();
        let opts = InjectOptions {
            action: Action::Symlink,
            ..InjectOptions::default()
        };
        inject(&root, src.path(), PREFIX, &opts).await.unwrap();
        let got = states(cache.path(), src.path());
        assert_eq!(got[0].1, SlotState::Linked);
    }
}
