//! Planning: source files → URLs → cache slots. No filesystem writes.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cache_slot::CacheSlot;
use crate::error::Result;
use crate::location::ScriptLocation;
use crate::walk::{self, SourceFile};

/// One source file and the slot it will occupy.
#[derive(Debug, Clone)]
pub struct PlannedSlot {
    pub source: SourceFile,
    /// `url_prefix + "/" + relative path`, byte for byte.
    pub url: String,
    pub slot: CacheSlot,
}

/// Builds the plan for every script under `root` (already canonical).
///
/// When two files land on the same destination the one whose relative path
/// sorts last is kept, so each destination is written by exactly one unit.
pub fn build_plan(
    cache_root: &Path,
    root: &Path,
    url_prefix: &str,
    extensions: &[String],
) -> Result<Vec<PlannedSlot>> {
    let mut planned = Vec::new();
    for source in walk::script_files(root, extensions)? {
        let url = format!("{}/{}", url_prefix, source.relative);
        let loc = ScriptLocation::parse(&url)?;
        let slot = CacheSlot::resolve(cache_root, &loc);
        planned.push(PlannedSlot { source, url, slot });
    }

    let mut last_for_dest: HashMap<PathBuf, usize> = HashMap::new();
    for (i, p) in planned.iter().enumerate() {
        last_for_dest.insert(p.slot.destination(), i);
    }
    if last_for_dest.len() == planned.len() {
        return Ok(planned);
    }

    let mut kept = Vec::with_capacity(last_for_dest.len());
    for (i, p) in planned.into_iter().enumerate() {
        if last_for_dest.get(&p.slot.destination()) == Some(&i) {
            kept.push(p);
        } else {
            tracing::warn!(
                source = %p.source.path.display(),
                url = %p.url,
                "skipped: another file maps to the same cache slot"
            );
        }
    }
    Ok(kept)
}
