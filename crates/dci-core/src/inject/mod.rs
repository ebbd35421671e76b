//! Injection: replace the Deno cache entries of a remote library with the
//! files of a local checkout.
//!
//! A run resolves the cache root, plans one slot per script file (URL =
//! prefix + `/` + relative path) and then applies the slots. Each slot is a
//! unit: directory, removal, content and sidecar are handled by one worker.

mod apply;
mod plan;
mod report;

use std::fmt;
use std::path::Path;

use crate::deno_dir::CacheRootProvider;
use crate::error::Result;
use crate::walk;

pub use plan::{build_plan, PlannedSlot};
pub use report::{InjectReport, SlotFailure, SlotOutcome};

/// What to put into each slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Action {
    /// Copy the local bytes.
    #[default]
    Copy,
    /// Link the slot to the absolute local path; later edits show through.
    Symlink,
    /// Only evict the current occupant.
    Delete,
}

impl Action {
    /// `delete` takes precedence over `use_symlink`.
    pub fn from_flags(delete: bool, use_symlink: bool) -> Self {
        if delete {
            Action::Delete
        } else if use_symlink {
            Action::Symlink
        } else {
            Action::Copy
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Copy => "copy",
            Action::Symlink => "link",
            Action::Delete => "delete",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct InjectOptions {
    pub action: Action,
    /// Slot units in flight at once; 1 processes files sequentially in path order.
    pub jobs: usize,
    /// Record per-file failures and continue instead of stopping at the first.
    pub keep_going: bool,
    /// Script extensions to pick up (without or with a leading dot).
    pub extensions: Vec<String>,
}

impl Default for InjectOptions {
    fn default() -> Self {
        Self {
            action: Action::Copy,
            jobs: 1,
            keep_going: false,
            extensions: walk::default_extensions(),
        }
    }
}

/// Replaces the cache slots for every script under `target_dir`.
///
/// Fails before touching the filesystem if the cache root cannot be resolved,
/// and before touching the cache if `target_dir` is not a directory or any
/// reconstructed URL is malformed.
pub async fn inject<P: CacheRootProvider + ?Sized>(
    roots: &P,
    target_dir: &Path,
    url_prefix: &str,
    options: &InjectOptions,
) -> Result<InjectReport> {
    let cache_root = roots.cache_root()?;
    let root = walk::source_root(target_dir)?;
    tracing::debug!(
        cache_root = %cache_root.display(),
        source = %root.display(),
        action = %options.action,
        jobs = options.jobs,
        "starting injection"
    );

    let planned = build_plan(&cache_root, &root, url_prefix, &options.extensions)?;
    tracing::debug!("planned {} slot(s)", planned.len());

    apply::run_plan(planned, options).await
}
