//! Command-line interface implementation for the materializer.
//! Provides argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Materialize a template subtree into the repository root",
    long_about = None
)]
pub struct Args {
    /// Directory holding the template root; rendered files land here
    #[arg(value_name = "WORKING_DIR", default_value = ".")]
    pub working_dir: PathBuf,

    /// Template root relative to the working directory, overriding the configuration
    #[arg(short, long, value_name = "DIR")]
    pub template_root: Option<PathBuf>,

    /// Configuration file to use instead of looking up materialize.{json,yml,yaml}
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read a JSON object of extra values from stdin.
    /// These values take precedence over environment variables of the same name.
    #[arg(short, long)]
    pub stdin: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling for argument errors
pub fn get_args() -> Args {
    Args::parse()
}
