//! Configuration handling for the materializer.
//! Built-in defaults are overridden by an optional configuration file in the
//! working directory, which is in turn overridden by command-line flags.

use crate::constants::{CONFIG_FILES, DEFAULT_CACHE_DIRS, DEFAULT_SCAFFOLD, DEFAULT_TEMPLATE_ROOT};
use crate::error::{Error, Result};
use crate::ignore::parse_verbatim_patterns;
use globset::GlobSet;
use log::debug;
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

/// Contents of a `materialize.{json,yml,yaml}` file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory promoted to the repository root
    pub template_root: PathBuf,
    /// Files and directories deleted before rendering
    pub scaffold: Vec<PathBuf>,
    /// Dependency caches deleted at teardown
    pub cache_dirs: Vec<PathBuf>,
    /// Glob patterns of template files relocated without rendering
    pub verbatim: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_root: PathBuf::from(DEFAULT_TEMPLATE_ROOT),
            scaffold: DEFAULT_SCAFFOLD.iter().map(PathBuf::from).collect(),
            cache_dirs: DEFAULT_CACHE_DIRS.iter().map(PathBuf::from).collect(),
            verbatim: Vec::new(),
        }
    }
}

/// Validated paths of one run, all joined onto the working directory.
#[derive(Debug, Clone)]
pub struct Layout {
    pub working_dir: PathBuf,
    pub template_root: PathBuf,
    pub scaffold: Vec<PathBuf>,
    pub cache_dirs: Vec<PathBuf>,
    pub verbatim: GlobSet,
}

/// Parses configuration content, trying JSON first and YAML second.
///
/// # Errors
/// * `Error::ConfigError` if the content is neither valid JSON nor valid YAML
///   for the configuration schema
pub fn parse_config(content: &str) -> Result<Config> {
    if content.trim().is_empty() {
        return Ok(Config::default());
    }
    match serde_json::from_str(content) {
        Ok(config) => Ok(config),
        Err(_) => serde_yaml::from_str(content)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
    }
}

/// Returns the first configuration file present in `working_dir`.
pub fn find_config_file<P: AsRef<Path>>(working_dir: P) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|file| working_dir.as_ref().join(file))
        .find(|path| path.is_file())
}

/// Loads the configuration for a run.
///
/// An explicit `config_file` must exist. Without one, the working directory is
/// searched for [`CONFIG_FILES`]; when none exists the defaults apply.
///
/// # Returns
/// * `Result<(Config, Option<PathBuf>)>` - The configuration and the file it was
///   discovered in, if any. Explicit files are not reported back, so they are
///   never deleted with the scaffold.
pub fn get_config<P: AsRef<Path>>(
    working_dir: P,
    config_file: Option<&Path>,
) -> Result<(Config, Option<PathBuf>)> {
    let (path, discovered) = match config_file {
        Some(path) => (path.to_path_buf(), false),
        None => match find_config_file(&working_dir) {
            Some(path) => (path, true),
            None => {
                debug!("No configuration file found, using defaults");
                return Ok((Config::default(), None));
            }
        },
    };

    debug!("Loading configuration from {}", path.display());
    let content = std::fs::read_to_string(&path).map_err(|e| {
        Error::ConfigError(format!("cannot read configuration '{}': {e}", path.display()))
    })?;
    let config = parse_config(&content)?;
    Ok((config, discovered.then_some(path)))
}

/// Checks that `path` stays inside the working directory and strips `.` components.
fn normalize_relative(field: &str, path: &Path) -> Result<PathBuf> {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(Error::ConfigError(format!(
                    "{field} '{}' must be a relative path inside the working directory",
                    path.display()
                )));
            }
        }
    }
    if normalized.as_os_str().is_empty() {
        return Err(Error::ConfigError(format!(
            "{field} '{}' must not be the working directory itself",
            path.display()
        )));
    }
    Ok(normalized)
}

impl Config {
    /// Validates the configuration and resolves it against `working_dir`.
    ///
    /// `config_file` is the discovered configuration file, which is deleted
    /// together with the scaffold.
    ///
    /// # Errors
    /// * `Error::ConfigError` if a path escapes the working directory, a
    ///   scaffold or cache path lies inside the template root, or a verbatim
    ///   pattern is invalid
    pub fn resolve<P: AsRef<Path>>(&self, working_dir: P, config_file: Option<&Path>) -> Result<Layout> {
        let working_dir = working_dir.as_ref();
        let template_root = normalize_relative("template_root", &self.template_root)?;

        let outside_template = |field: &str, path: &Path| -> Result<PathBuf> {
            let path = normalize_relative(field, path)?;
            if path.starts_with(&template_root) || template_root.starts_with(&path) {
                return Err(Error::ConfigError(format!(
                    "{field} '{}' overlaps the template root '{}'",
                    path.display(),
                    template_root.display()
                )));
            }
            Ok(working_dir.join(path))
        };

        let mut scaffold = self
            .scaffold
            .iter()
            .map(|path| outside_template("scaffold", path))
            .collect::<Result<Vec<_>>>()?;
        if let Some(config_file) = config_file {
            scaffold.push(config_file.to_path_buf());
        }

        let cache_dirs = self
            .cache_dirs
            .iter()
            .map(|path| outside_template("cache_dirs", path))
            .collect::<Result<Vec<_>>>()?;

        Ok(Layout {
            working_dir: working_dir.to_path_buf(),
            template_root: working_dir.join(template_root),
            scaffold,
            cache_dirs,
            verbatim: parse_verbatim_patterns(&self.verbatim)?,
        })
    }
}
