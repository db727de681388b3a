//! Common constants used throughout the materializer.

/// Supported configuration file names, looked up in this order
pub const CONFIG_FILES: [&str; 3] = ["materialize.json", "materialize.yml", "materialize.yaml"];

/// Directory promoted to the repository root when nothing else is configured
pub const DEFAULT_TEMPLATE_ROOT: &str = "template";

/// Paths that only exist to host the template repository itself
pub const DEFAULT_SCAFFOLD: [&str; 4] = [".github", ".gitignore", "README.md", "tsconfig.json"];

/// Dependency caches left behind by the tooling that launched the run
pub const DEFAULT_CACHE_DIRS: [&str; 1] = ["node_modules"];

/// Suffix of the sibling file a rendered template is staged in before it replaces the original
pub const STAGING_SUFFIX: &str = ".materialize.tmp";
