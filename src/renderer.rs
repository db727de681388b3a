//! Placeholder rendering for template files.
//! Substitutes `{{NAME}}` tokens with values from a [`ValueMapping`] and
//! rewrites template files in place.

use crate::constants::STAGING_SUFFIX;
use crate::error::{Error, Result};
use crate::values::ValueMapping;
use log::{debug, warn};
use regex::{Captures, Regex};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// `{{IDENT}}` with optional whitespace inside the braces.
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{[ \t]*([A-Za-z_][A-Za-z0-9_]*)[ \t]*\}\}").expect("token pattern is valid")
});

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders template text with the given values.
    ///
    /// # Arguments
    /// * `template` - Template text to render
    /// * `values` - Values placeholders resolve to
    ///
    /// # Returns
    /// * `String` - Rendered text
    fn render(&self, template: &str, values: &ValueMapping) -> String;
}

/// Flat variable substitution engine.
///
/// Every recognized placeholder is replaced in a single pass; substituted values
/// are never scanned again and everything outside placeholder spans is kept
/// byte for byte. Absent keys render as an empty string.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenRenderer;

impl TokenRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for TokenRenderer {
    fn render(&self, template: &str, values: &ValueMapping) -> String {
        TOKEN
            .replace_all(template, |caps: &Captures| values.get(&caps[1]).to_string())
            .into_owned()
    }
}

/// Names of the placeholders referenced in `template`, in order of appearance.
pub fn placeholders(template: &str) -> Vec<&str> {
    TOKEN
        .captures_iter(template)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(STAGING_SUFFIX);
    let mut staging = path.to_path_buf();
    staging.set_file_name(format!(".{}", name.to_string_lossy()));
    staging
}

fn write_staged(
    mut file: File,
    staging: &Path,
    path: &Path,
    content: &str,
    permissions: fs::Permissions,
) -> io::Result<()> {
    file.write_all(content.as_bytes())?;
    file.sync_all()?;
    drop(file);
    fs::set_permissions(staging, permissions)?;
    fs::rename(staging, path)
}

/// Replaces the content of `path` so that it holds either the old or the new
/// content, never a mix. The original permissions are carried over.
///
/// The staging file must not exist yet: an entry already holding that name is
/// never truncated or removed.
fn replace_content(path: &Path, content: &str, permissions: fs::Permissions) -> io::Result<()> {
    let staging = staging_path(path);
    let file = OpenOptions::new().write(true).create_new(true).open(&staging).map_err(|e| {
        if e.kind() == io::ErrorKind::AlreadyExists {
            io::Error::new(
                e.kind(),
                format!("staging file '{}' already exists", staging.display()),
            )
        } else {
            e
        }
    })?;

    let result = write_staged(file, &staging, path, content, permissions);
    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    result
}

/// What rendering did to a file entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// At least one placeholder was substituted
    Rendered,
    /// No placeholder; the file was left untouched
    Unchanged,
    /// Not a regular file (symbolic link); never read nor written
    Skipped,
}

/// Renders the file at `path` in place.
///
/// Symbolic links are left alone. A file without placeholders is not
/// rewritten.
///
/// # Returns
/// * `Result<RenderOutcome>` - What happened to the file
///
/// # Errors
/// * `Error::RenderError` if the file cannot be read as UTF-8 text or the
///   rendered content cannot be written back
pub fn render_file<P: AsRef<Path>>(
    path: P,
    engine: &dyn TemplateRenderer,
    values: &ValueMapping,
) -> Result<RenderOutcome> {
    let path = path.as_ref();
    let render_error = |source| Error::RenderError { path: path.to_path_buf(), source };

    let metadata = fs::symlink_metadata(path).map_err(render_error)?;
    if !metadata.is_file() {
        debug!("Skipping non-regular file: {}", path.display());
        return Ok(RenderOutcome::Skipped);
    }

    let content = fs::read_to_string(path).map_err(render_error)?;
    for key in placeholders(&content) {
        if !values.contains_key(key) {
            warn!("'{}' references undefined value '{key}', rendering it empty.", path.display());
        }
    }
    let rendered = engine.render(&content, values);
    if rendered == content {
        debug!("Unchanged: {}", path.display());
        return Ok(RenderOutcome::Unchanged);
    }

    replace_content(path, &rendered, metadata.permissions()).map_err(render_error)?;
    debug!("Rendered: {}", path.display());
    Ok(RenderOutcome::Rendered)
}
