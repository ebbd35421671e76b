//! Discovery of the local script files that shadow remote modules.

use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{InjectError, Result};

/// Script extensions picked up when nothing else is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "ts"];

pub fn default_extensions() -> Vec<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

/// A candidate file under the source root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Absolute path (under the canonical source root).
    pub path: PathBuf,
    /// Path relative to the source root, `/`-separated.
    pub relative: String,
}

/// Canonicalizes `target` and checks that it is a directory.
pub fn source_root(target: &Path) -> Result<PathBuf> {
    let root = target
        .canonicalize()
        .map_err(|e| InjectError::fs("open source directory", target, e))?;
    if !root.is_dir() {
        return Err(InjectError::NotADirectory {
            path: target.to_path_buf(),
        });
    }
    Ok(root)
}

/// Lists regular files under `root` whose extension is in `extensions`, sorted
/// by the bytes of their `/`-joined relative path. Symlinks are neither
/// followed nor listed.
pub fn script_files(root: &Path, extensions: &[String]) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || !has_extension(entry.path(), extensions) {
            continue;
        }
        let relative = relative_url_path(entry.path(), root)?;
        files.push(SourceFile {
            path: entry.into_path(),
            relative,
        });
    }
    files.sort_by(|a, b| a.relative.cmp(&b.relative));
    Ok(files)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|want| want.trim_start_matches('.') == ext)
}

/// Joins the components of `path` relative to `root` with `/`.
fn relative_url_path(path: &Path, root: &Path) -> Result<String> {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let mut parts = Vec::new();
    for component in rel.components() {
        if let Component::Normal(part) = component {
            let part = part.to_str().ok_or_else(|| InjectError::NonUtf8Path {
                path: path.to_path_buf(),
            })?;
            parts.push(part);
        }
    }
    Ok(parts.join("/"))
}
