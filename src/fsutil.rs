//! Atomic replace-on-write for the chart and the report.
//!
//! Output goes to a temp file in the destination directory which is then
//! renamed over the destination, so readers see either the old file or the
//! complete new one. A symlinked destination is followed so the rename lands
//! on the real file, and an existing file keeps its permissions.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};

use crate::errors::{Error, Result};

fn parent_dir_or_dot(path: &Path) -> &Path {
    // `Path::parent` is `Some("")` for bare file names.
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

fn write_err(dest: &Path) -> impl FnOnce(std::io::Error) -> Error + '_ {
    move |source| Error::Write {
        path: dest.to_path_buf(),
        source,
    }
}

/// The file the rename must replace: `dest` itself, or its target when `dest`
/// is an existing symlink.
fn resolve_dest(dest: &Path) -> PathBuf {
    fs::canonicalize(dest).unwrap_or_else(|_| dest.to_path_buf())
}

/// Give `tmp` the permissions of `target` when `target` already exists.
fn copy_permissions(target: &Path, tmp: &Path) -> io::Result<()> {
    match fs::metadata(target) {
        Ok(meta) => fs::set_permissions(tmp, meta.permissions()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Atomically replace `dest` with `bytes`, creating parent directories as needed.
///
/// # Errors
///
/// [`Error::Write`] if any step fails; `dest` is left untouched in that case.
pub fn atomic_write_bytes(dest: &Path, bytes: &[u8]) -> Result<()> {
    let target = resolve_dest(dest);
    let dir = parent_dir_or_dot(&target);
    fs::create_dir_all(dir).map_err(write_err(dest))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err(dest))?;
    tmp.write_all(bytes).map_err(write_err(dest))?;
    tmp.as_file().sync_all().map_err(write_err(dest))?;
    copy_permissions(&target, tmp.path()).map_err(write_err(dest))?;
    tmp.persist(&target).map_err(|e| Error::Write {
        path: dest.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

/// Like [`atomic_write_bytes`], but hands a temp file *path* to `write_fn`.
///
/// The temp path keeps the extension of `dest`, for writers that pick the
/// encoding from the file name. If `write_fn` fails, the temp file is removed
/// and `dest` is left untouched.
///
/// # Errors
///
/// Whatever `write_fn` returns, or [`Error::Write`] for the temp file and rename steps.
pub fn atomic_write_with_path(
    dest: &Path,
    write_fn: impl FnOnce(&Path) -> Result<()>,
) -> Result<()> {
    let target = resolve_dest(dest);
    let dir = parent_dir_or_dot(&target);
    fs::create_dir_all(dir).map_err(write_err(dest))?;

    let suffix = dest
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    let tmp = Builder::new()
        .prefix(".tmp-")
        .suffix(&suffix)
        .tempfile_in(dir)
        .map_err(write_err(dest))?;
    let tmp_path = tmp.into_temp_path();

    write_fn(&tmp_path)?;

    File::open(&tmp_path)
        .and_then(|f| f.sync_all())
        .map_err(write_err(dest))?;
    copy_permissions(&target, &tmp_path).map_err(write_err(dest))?;
    tmp_path.persist(&target).map_err(|e| Error::Write {
        path: dest.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
