//! Materializer's application entry point.
//! Parses the command line, captures the value mapping and runs the pipeline.

use materializer::{
    cli::{get_args, Args},
    config::get_config,
    error::{default_error_handler, Result},
    logger::init_logger,
    processor::Materializer,
    renderer::TokenRenderer,
    values::ValueMapping,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the configuration and applies command-line overrides
/// 2. Captures the value mapping from the environment (and stdin)
/// 3. Runs scaffold cleanup, rendering, relocation and teardown
fn run(args: Args) -> Result<()> {
    let (mut config, config_file) = get_config(&args.working_dir, args.config.as_deref())?;
    if let Some(template_root) = args.template_root {
        config.template_root = template_root;
    }
    let layout = config.resolve(&args.working_dir, config_file.as_deref())?;

    let mut values = ValueMapping::from_env();
    if args.stdin {
        values = values.overlay(ValueMapping::from_stdin()?);
    }
    log::debug!("Captured {} values.", values.len());

    let engine = TokenRenderer::new();
    println!("Materializing '{}'.", layout.template_root.display());
    let report = Materializer::new(&engine, &values, &layout).run()?;

    println!("Template materialized successfully in {}: {report}.", layout.working_dir.display());
    Ok(())
}
