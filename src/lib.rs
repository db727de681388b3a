//! Materializer turns a parameterized template subtree into a ready-to-use repository.
//! It renders `{{NAME}}` placeholders from the environment, moves the rendered
//! files up to the repository root and removes the scaffold that hosted the template.

/// Command-line interface module
pub mod cli;

/// Configuration handling
/// Supports JSON and YAML formats (materialize.json, materialize.yml, materialize.yaml)
pub mod config;

/// Common constants and defaults
pub mod constants;

/// Error types and handling
pub mod error;

/// Glob patterns of files kept verbatim
pub mod ignore;

/// Logger initialization
pub mod logger;

/// Phase sequencing of a materialization run
pub mod processor;

/// Moving rendered files to the repository root
pub mod relocator;

/// Placeholder rendering
pub mod renderer;

/// The value mapping placeholders resolve against
pub mod values;

/// Recursive template tree traversal
pub mod walker;
