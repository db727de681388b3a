//! Verbatim pattern handling.
//! Files matching one of these glob patterns are relocated as they are,
//! without placeholder rendering, which keeps binary assets intact.

use crate::error::{Error, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

/// Compiles verbatim glob patterns into a set.
///
/// # Arguments
/// * `patterns` - Glob patterns matched against paths relative to the template root
///
/// # Returns
/// * `Result<GlobSet>` - Compiled patterns, empty when no pattern is given
///
/// # Example
/// ```yaml
/// verbatim:
///   - "**/*.png"
///   - "assets/**"
/// ```
pub fn parse_verbatim_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let pattern = pattern.as_ref();
        builder.add(Glob::new(pattern).map_err(|e| {
            Error::ConfigError(format!("invalid verbatim pattern '{pattern}': {e}"))
        })?);
    }
    builder
        .build()
        .map_err(|e| Error::ConfigError(format!("verbatim patterns loading failed: {e}")))
}

/// Whether `file` should skip rendering.
pub fn is_verbatim(patterns: &GlobSet, file: &Path, template_root: &Path) -> bool {
    let relative = file.strip_prefix(template_root).unwrap_or(file);
    patterns.is_match(relative)
}
