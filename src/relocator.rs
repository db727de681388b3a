//! Moves rendered files out of the template root.
//!
//! The destination of a file is its path relative to the template root, joined
//! onto the output root. Missing destination directories are created right
//! before the move, never speculatively.

use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Computes where `file` lands once the `template_root` prefix is stripped.
///
/// # Errors
/// * `Error::RelocationError` if `file` is not below `template_root`, or if the
///   destination would fall back inside `template_root`
pub fn destination_path(file: &Path, template_root: &Path, output_root: &Path) -> Result<PathBuf> {
    let relative = file.strip_prefix(template_root).map_err(|_| Error::RelocationError {
        source_path: file.to_path_buf(),
        destination: output_root.to_path_buf(),
        reason: format!("file is not below the template root '{}'", template_root.display()),
    })?;

    let destination = output_root.join(relative);
    if destination.starts_with(template_root) {
        return Err(Error::RelocationError {
            source_path: file.to_path_buf(),
            destination,
            reason: "destination lies inside the template root".to_string(),
        });
    }
    Ok(destination)
}

/// Rejects a destination below one of the `reserved` directories.
///
/// Reserved directories are deleted at teardown, so anything moved into them
/// would be lost.
///
/// # Errors
/// * `Error::RelocationError` naming the reserved directory the destination falls in
pub fn check_reserved(file: &Path, destination: &Path, reserved: &[PathBuf]) -> Result<()> {
    match reserved.iter().find(|dir| destination.starts_with(dir)) {
        Some(dir) => Err(Error::RelocationError {
            source_path: file.to_path_buf(),
            destination: destination.to_path_buf(),
            reason: format!("destination lies inside '{}', which is deleted at teardown", dir.display()),
        }),
        None => Ok(()),
    }
}

/// Moves `file` from below `template_root` to its stripped path below `output_root`.
///
/// The destination's parent chain is created if it does not exist yet; the move
/// itself is attempted exactly once.
///
/// # Returns
/// * `Result<PathBuf>` - The destination the file was moved to
///
/// # Errors
/// * `Error::RelocationError` if the destination already exists, its parent
///   cannot be created, or the move fails
pub fn relocate<P: AsRef<Path>>(file: P, template_root: &Path, output_root: &Path) -> Result<PathBuf> {
    let file = file.as_ref();
    let destination = destination_path(file, template_root, output_root)?;
    let relocation_error = |reason: String| Error::RelocationError {
        source_path: file.to_path_buf(),
        destination: destination.clone(),
        reason,
    };

    // A rename would silently replace an existing file
    if fs::symlink_metadata(&destination).is_ok() {
        return Err(relocation_error("destination already exists".to_string()));
    }

    if let Some(parent) = destination.parent() {
        if !parent.exists() {
            debug!("Creating directory: {}", parent.display());
            fs::create_dir_all(parent).map_err(|e| {
                relocation_error(format!("cannot create '{}': {e}", parent.display()))
            })?;
        }
    }

    fs::rename(file, &destination).map_err(|e| relocation_error(e.to_string()))?;
    debug!("Moved '{}' to '{}'", file.display(), destination.display());
    Ok(destination)
}
