//! Error handling for the materializer.
//! Defines the error taxonomy of the pipeline and the result alias used throughout.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::processor::Phase;

/// Errors raised while materializing a template.
///
/// Every variant is fatal to the run. The only failure the pipeline ever swallows
/// is "path already absent" while deleting scaffold or teardown paths.
#[derive(Error, Debug)]
pub enum Error {
    /// A directory under the template root could not be listed
    #[error("Cannot traverse '{}': {source}.", .path.display())]
    TraversalError { path: PathBuf, source: io::Error },

    /// A template file could not be read, decoded as UTF-8 or written back
    #[error("Cannot render '{}': {source}.", .path.display())]
    RenderError { path: PathBuf, source: io::Error },

    /// A rendered file could not be moved to its destination
    #[error("Cannot move '{}' to '{}': {reason}.", .source_path.display(), .destination.display())]
    RelocationError { source_path: PathBuf, destination: PathBuf, reason: String },

    /// A scaffold, template root or cache path exists but could not be removed
    #[error("Cannot remove '{}': {source}.", .path.display())]
    CleanupError { path: PathBuf, source: io::Error },

    /// The template root still holds files when teardown is about to delete it
    #[error("Template root '{}' still contains '{}'.", .template_root.display(), .remaining.display())]
    TemplateRootNotEmptyError { template_root: PathBuf, remaining: PathBuf },

    /// Invalid configuration file, command-line value or stdin values
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// Wraps the error that aborted a pipeline phase
    #[error("{phase} phase aborted. {source}")]
    PhaseError {
        phase: Phase,
        #[source]
        source: Box<Error>,
    },
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
