use crate::error::{AgentOsError, Result};
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// Recursively copy `src` into `dest`, creating `dest` and its ancestors.
///
/// Files are copied byte-for-byte; existing destination files are overwritten.
/// Symlinks are not followed while walking, so a linked file is copied as the
/// content it points to and a linked directory is skipped.
///
/// Returns the number of files copied.
///
/// # Errors
/// Returns `SourceNotFound` if `src` is not a directory, or an IO/walk error
/// on the first entry that cannot be read or written.
pub fn copy_tree(src: &Path, dest: &Path) -> Result<usize> {
    if !src.is_dir() {
        return Err(AgentOsError::SourceNotFound(src.to_path_buf()));
    }

    fs::create_dir_all(dest)?;

    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(io::Error::other)?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else if entry.path().is_file() {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}
