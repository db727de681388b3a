//! Recursive enumeration of the template tree.

use crate::error::{Error, Result};
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

fn traversal_error(err: walkdir::Error, root: &Path) -> Error {
    let path = err.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
    let source = err
        .into_io_error()
        .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
    Error::TraversalError { path, source }
}

/// Calls `visit` for every file entry below `dir`, descending into every subdirectory.
///
/// Directories are never passed to `visit`. Symbolic links are not followed and
/// are visited as file entries. Each directory listing is read completely and
/// sorted by name before any of its entries is visited, so `visit` is free to
/// move or create files in the directory being walked.
///
/// # Errors
/// * `Error::TraversalError` if `dir` or any directory below it cannot be listed
/// * Any error returned by `visit`, which stops the walk
pub fn walk<P, F>(dir: P, mut visit: F) -> Result<()>
where
    P: AsRef<Path>,
    F: FnMut(&Path) -> Result<()>,
{
    let dir = dir.as_ref();
    let metadata = fs::metadata(dir)
        .map_err(|source| Error::TraversalError { path: dir.to_path_buf(), source })?;
    if !metadata.is_dir() {
        return Err(Error::TraversalError {
            path: dir.to_path_buf(),
            source: io::Error::other("not a directory"),
        });
    }

    for entry in WalkDir::new(dir).min_depth(1).follow_links(false).sort_by_file_name() {
        let entry = entry.map_err(|e| traversal_error(e, dir))?;
        if entry.file_type().is_dir() {
            debug!("Entering directory: {}", entry.path().display());
            continue;
        }
        visit(entry.path())?;
    }
    Ok(())
}

/// Collects every file entry below `dir`.
pub fn list_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    walk(dir, |path| {
        files.push(path.to_path_buf());
        Ok(())
    })?;
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_visit_error_stops_walk() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.txt"), "a").unwrap();
        fs::write(temp_dir.path().join("b.txt"), "b").unwrap();

        let mut visited = 0;
        let result = walk(temp_dir.path(), |_| {
            visited += 1;
            Err(Error::ConfigError("stop".to_string()))
        });

        assert!(matches!(result, Err(Error::ConfigError(_))));
        assert_eq!(visited, 1);
    }

    #[test]
    fn test_file_root_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, "content").unwrap();

        match walk(&file, |_| Ok(())) {
            Err(Error::TraversalError { path, .. }) => assert_eq!(path, file),
            other => panic!("Expected TraversalError, got {other:?}"),
        }
    }
}
