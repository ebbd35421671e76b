//! Filesystem capability used by the injector.
//!
//! Content and sidecar writes land in a `.part` temp file first and are then
//! renamed over the destination, so Deno never reads a half-written slot.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::{InjectError, Result};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path.
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Creates `dir` and its parents. Succeeds if it already exists, including
/// when another worker creates it concurrently.
pub async fn ensure_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .await
        .map_err(|e| InjectError::fs("create directory", dir, e))
}

/// Removes whatever occupies `path`: a file or a symlink, dangling ones included.
/// Returns `false` when nothing was there.
pub async fn remove_occupant(path: &Path) -> Result<bool> {
    match fs::symlink_metadata(path).await {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(InjectError::fs("stat", path, e)),
    }
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(InjectError::fs("remove", path, e)),
    }
}

/// Copies `source` to `dest` through a temp file.
pub async fn copy_into(source: &Path, dest: &Path) -> Result<()> {
    let tmp = temp_path(dest);
    if let Err(e) = fs::copy(source, &tmp).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(InjectError::fs("copy", source, e));
    }
    finalize(&tmp, dest).await
}

/// Writes `contents` to `dest` through a temp file, replacing any previous file.
pub async fn write_atomic(dest: &Path, contents: &[u8]) -> Result<()> {
    let tmp = temp_path(dest);
    if let Err(e) = fs::write(&tmp, contents).await {
        let _ = fs::remove_file(&tmp).await;
        return Err(InjectError::fs("write", &tmp, e));
    }
    finalize(&tmp, dest).await
}

/// Creates a symlink at `dest` pointing to `source`. `dest` must not exist.
pub async fn link_into(source: &Path, dest: &Path) -> Result<()> {
    #[cfg(unix)]
    let res = fs::symlink(source, dest).await;
    #[cfg(windows)]
    let res = fs::symlink_file(source, dest).await;
    res.map_err(|e| InjectError::fs("symlink", dest, e))
}

async fn finalize(tmp: &Path, dest: &Path) -> Result<()> {
    if let Err(e) = fs::rename(tmp, dest).await {
        let _ = fs::remove_file(tmp).await;
        return Err(InjectError::fs("rename", dest, e));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("/deps/https/h/abc"));
        assert_eq!(p.to_string_lossy(), "/deps/https/h/abc.part");
    }

    #[tokio::test]
    async fn ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deps/https/example.com");
        ensure_dir(&nested).await.unwrap();
        ensure_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
    }

    #[tokio::test]
    async fn remove_occupant_reports_presence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slot");
        assert!(!remove_occupant(&path).await.unwrap());
        std::fs::write(&path, "x").unwrap();
        assert!(remove_occupant(&path).await.unwrap());
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn remove_occupant_handles_dangling_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slot");
        std::os::unix::fs::symlink(dir.path().join("gone.ts"), &path).unwrap();
        assert!(remove_occupant(&path).await.unwrap());
        assert!(std::fs::symlink_metadata(&path).is_err());
    }

    #[tokio::test]
    async fn copy_into_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("mod.ts");
        let dest = dir.path().join("slot");
        std::fs::write(&src, "export const a = 1;").unwrap();
        copy_into(&src, &dest).await.unwrap();
        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "export const a = 1;");
        assert!(!temp_path(&dest).exists());
    }

    #[tokio::test]
    async fn copy_into_missing_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = copy_into(&dir.path().join("nope.ts"), &dir.path().join("slot"))
            .await
            .unwrap_err();
        assert!(matches!(err, InjectError::Filesystem { op: "copy", .. }));
        assert!(!dir.path().join("slot.part").exists());
    }

    #[tokio::test]
    async fn write_atomic_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("slot.metadata.json");
        write_atomic(&dest, b"old").await.unwrap();
        write_atomic(&dest, b"new").await.unwrap();
        assert_eq!(std::fs::read(&dest).unwrap(), b"new");
    }
}
