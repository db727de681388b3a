//! Materialization orchestration.
//! Runs the four pipeline phases in order: scaffold cleanup, rendering,
//! relocation and teardown. A phase only starts once the previous one has
//! finished for every path.

use crate::config::Layout;
use crate::error::{Error, Result};
use crate::ignore::is_verbatim;
use crate::relocator::{check_reserved, destination_path, relocate};
use crate::renderer::{render_file, RenderOutcome, TemplateRenderer};
use crate::values::ValueMapping;
use crate::walker::{list_files, walk};
use log::{debug, info};
use std::fs;
use std::io;
use std::path::Path;

/// Pipeline phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    ScaffoldCleanup,
    Render,
    Relocate,
    Teardown,
}

impl Phase {
    pub const ALL: [Phase; 4] =
        [Phase::ScaffoldCleanup, Phase::Render, Phase::Relocate, Phase::Teardown];
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::ScaffoldCleanup => "Scaffold cleanup",
            Phase::Render => "Render",
            Phase::Relocate => "Relocate",
            Phase::Teardown => "Teardown",
        };
        f.write_str(name)
    }
}

/// What a completed run did.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    /// Template files whose content changed
    pub rendered: usize,
    /// Template files without any placeholder
    pub unchanged: usize,
    /// Template files matching a verbatim pattern
    pub verbatim: usize,
    /// Symbolic links, relocated but never rendered
    pub skipped: usize,
    /// Files moved out of the template root
    pub relocated: usize,
    /// Scaffold, template root and cache paths that existed and were deleted
    pub removed: usize,
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} rendered, {} unchanged, {} verbatim, {} skipped, {} relocated, {} removed",
            self.rendered,
            self.unchanged,
            self.verbatim,
            self.skipped,
            self.relocated,
            self.removed
        )
    }
}

/// Deletes `path`, whatever kind of entry it is.
///
/// # Returns
/// * `Result<bool>` - `false` if the path was already absent
///
/// # Errors
/// * `Error::CleanupError` if the path exists but cannot be removed
pub fn remove_path<P: AsRef<Path>>(path: P) -> Result<bool> {
    let path = path.as_ref();
    let cleanup_error = |source| Error::CleanupError { path: path.to_path_buf(), source };

    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("Already absent: {}", path.display());
            return Ok(false);
        }
        Err(e) => return Err(cleanup_error(e)),
    };

    let result = if metadata.is_dir() { fs::remove_dir_all(path) } else { fs::remove_file(path) };
    match result {
        Ok(()) => {
            debug!("Removed: {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(cleanup_error(e)),
    }
}

/// Deletes every scaffold path, tolerating paths that are already gone.
///
/// # Returns
/// * `Result<usize>` - Number of paths that existed and were removed
pub fn cleanup_scaffold<P: AsRef<Path>>(scaffold: &[P]) -> Result<usize> {
    let mut removed = 0;
    for path in scaffold {
        if remove_path(path)? {
            removed += 1;
        }
    }
    Ok(removed)
}

/// Orchestrates one materialization run.
///
/// The value mapping and layout are fixed at construction. [`Materializer::run`]
/// consumes the materializer, so a run can never be resumed or repeated.
pub struct Materializer<'a> {
    engine: &'a dyn TemplateRenderer,
    values: &'a ValueMapping,
    layout: &'a Layout,
    report: Report,
}

impl<'a> Materializer<'a> {
    pub fn new(engine: &'a dyn TemplateRenderer, values: &'a ValueMapping, layout: &'a Layout) -> Self {
        Self { engine, values, layout, report: Report::default() }
    }

    /// Runs every phase in order.
    ///
    /// # Returns
    /// * `Result<Report>` - The report of a completed run
    ///
    /// # Errors
    /// * `Error::PhaseError` naming the phase that aborted the run and wrapping
    ///   the error that caused it. Later phases are not attempted.
    pub fn run(mut self) -> Result<Report> {
        for phase in Phase::ALL {
            info!("{phase} phase started.");
            if let Err(source) = self.run_phase(phase) {
                return Err(Error::PhaseError { phase, source: Box::new(source) });
            }
        }
        info!("Materialization completed: {}.", self.report);
        Ok(self.report)
    }

    fn run_phase(&mut self, phase: Phase) -> Result<()> {
        match phase {
            Phase::ScaffoldCleanup => self.cleanup(),
            Phase::Render => self.render(),
            Phase::Relocate => self.relocate(),
            Phase::Teardown => self.teardown(),
        }
    }

    fn cleanup(&mut self) -> Result<()> {
        self.report.removed += cleanup_scaffold(&self.layout.scaffold)?;
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let (engine, values, layout) = (self.engine, self.values, self.layout);
        let report = &mut self.report;
        walk(&layout.template_root, |path| {
            if is_verbatim(&layout.verbatim, path, &layout.template_root) {
                debug!("Keeping verbatim: {}", path.display());
                report.verbatim += 1;
            } else {
                match render_file(path, engine, values)? {
                    RenderOutcome::Rendered => report.rendered += 1,
                    RenderOutcome::Unchanged => report.unchanged += 1,
                    RenderOutcome::Skipped => report.skipped += 1,
                }
            }
            Ok(())
        })
    }

    fn relocate(&mut self) -> Result<()> {
        let layout = self.layout;

        // Cache directories are deleted at teardown; refuse before anything moves
        walk(&layout.template_root, |path| {
            let destination = destination_path(path, &layout.template_root, &layout.working_dir)?;
            check_reserved(path, &destination, &layout.cache_dirs)
        })?;

        let report = &mut self.report;
        walk(&layout.template_root, |path| {
            relocate(path, &layout.template_root, &layout.working_dir)?;
            report.relocated += 1;
            Ok(())
        })
    }

    fn teardown(&mut self) -> Result<()> {
        let layout = self.layout;
        let template_root = &layout.template_root;
        if template_root.exists() {
            if let Some(remaining) = list_files(template_root)?.into_iter().next() {
                return Err(Error::TemplateRootNotEmptyError {
                    template_root: template_root.clone(),
                    remaining,
                });
            }
            if remove_path(template_root)? {
                self.report.removed += 1;
            }
        }
        self.report.removed += cleanup_scaffold(&layout.cache_dirs)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_order() {
        assert_eq!(
            Phase::ALL,
            [Phase::ScaffoldCleanup, Phase::Render, Phase::Relocate, Phase::Teardown]
        );
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::ScaffoldCleanup.to_string(), "Scaffold cleanup");
        assert_eq!(Phase::Teardown.to_string(), "Teardown");
    }

    #[test]
    fn test_report_display() {
        let report =
            Report { rendered: 2, unchanged: 1, verbatim: 0, skipped: 1, relocated: 4, removed: 4 };
        assert_eq!(
            report.to_string(),
            "2 rendered, 1 unchanged, 0 verbatim, 1 skipped, 4 relocated, 4 removed"
        );
    }
}
