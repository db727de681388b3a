//! Logging setup for the `materialize` binary.

use log::LevelFilter;

/// Environment variable holding `env_logger` directives that override the
/// command-line verbosity, e.g. `MATERIALIZE_LOG=materializer::renderer=debug`.
pub const LOG_ENV: &str = "MATERIALIZE_LOG";

/// Log targets of the library and of the `materialize` binary.
const TARGETS: [&str; 2] = [env!("CARGO_CRATE_NAME"), "materialize"];

/// Filter applied to this package's own records.
pub fn level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Initializes the `env_logger` backend for the `log` facade.
///
/// Records from dependencies are limited to warnings; this package logs at
/// `level(verbose)`. Directives in [`LOG_ENV`] are applied last. Output carries
/// the level and message only, since each run is short-lived.
pub fn init_logger(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn);
    for target in TARGETS {
        builder.filter_module(target, level(verbose));
    }
    builder
        .parse_env(LOG_ENV)
        .format_timestamp(None)
        .format_target(false)
        .init();
}
