use materializer::config::{find_config_file, get_config, parse_config, Config};
use materializer::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.template_root, PathBuf::from("template"));
    assert_eq!(
        config.scaffold,
        vec![
            PathBuf::from(".github"),
            PathBuf::from(".gitignore"),
            PathBuf::from("README.md"),
            PathBuf::from("tsconfig.json"),
        ]
    );
    assert_eq!(config.cache_dirs, vec![PathBuf::from("node_modules")]);
    assert!(config.verbatim.is_empty());
}

#[test]
fn test_parse_json_config() {
    let config = parse_config(r#"{"template_root": "skeleton", "verbatim": ["**/*.png"]}"#).unwrap();

    assert_eq!(config.template_root, PathBuf::from("skeleton"));
    assert_eq!(config.verbatim, vec!["**/*.png".to_string()]);
    // Unset fields keep their defaults
    assert_eq!(config.cache_dirs, vec![PathBuf::from("node_modules")]);
}

#[test]
fn test_parse_yaml_config() {
    let content = "scaffold:\n  - .gitignore\n  - LICENSE\ncache_dirs: []\n";
    let config = parse_config(content).unwrap();

    assert_eq!(config.scaffold, vec![PathBuf::from(".gitignore"), PathBuf::from("LICENSE")]);
    assert!(config.cache_dirs.is_empty());
    assert_eq!(config.template_root, PathBuf::from("template"));
}

#[test]
fn test_parse_empty_config() {
    assert_eq!(parse_config("").unwrap(), Config::default());
}

#[test]
fn test_parse_unknown_field() {
    let result = parse_config("templates: skeleton\n");
    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_find_config_file_order() {
    let temp_dir = TempDir::new().unwrap();
    assert_eq!(find_config_file(temp_dir.path()), None);

    fs::write(temp_dir.path().join("materialize.yaml"), "").unwrap();
    fs::write(temp_dir.path().join("materialize.json"), "{}").unwrap();

    assert_eq!(
        find_config_file(temp_dir.path()),
        Some(temp_dir.path().join("materialize.json"))
    );
}

#[test]
fn test_get_config_discovered_file_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("materialize.yml");
    fs::write(&config_path, "template_root: skeleton\n").unwrap();

    let (config, discovered) = get_config(temp_dir.path(), None).unwrap();

    assert_eq!(config.template_root, PathBuf::from("skeleton"));
    assert_eq!(discovered, Some(config_path));
}

#[test]
fn test_get_config_explicit_file_is_not_reported() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("custom.yaml");
    fs::write(&config_path, "template_root: skeleton\n").unwrap();

    let (config, discovered) = get_config(temp_dir.path(), Some(&config_path)).unwrap();

    assert_eq!(config.template_root, PathBuf::from("skeleton"));
    assert_eq!(discovered, None);
}

#[test]
fn test_get_config_missing_explicit_file() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.yaml");

    let result = get_config(temp_dir.path(), Some(&missing));
    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_resolve_joins_working_dir() {
    let working_dir = Path::new("/work");
    let config_file = working_dir.join("materialize.yaml");

    let layout = Config::default().resolve(working_dir, Some(&config_file)).unwrap();

    assert_eq!(layout.template_root, PathBuf::from("/work/template"));
    assert_eq!(layout.cache_dirs, vec![PathBuf::from("/work/node_modules")]);
    assert_eq!(layout.scaffold.len(), 5);
    assert_eq!(layout.scaffold.last(), Some(&config_file));
}

#[test]
fn test_resolve_rejects_scaffold_inside_template_root() {
    let config = Config { scaffold: vec![PathBuf::from("template/README.md")], ..Config::default() };
    let result = config.resolve("/work", None);
    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_resolve_rejects_cache_containing_template_root() {
    let config = Config {
        template_root: PathBuf::from("node_modules/template"),
        ..Config::default()
    };
    let result = config.resolve("/work", None);
    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_resolve_rejects_escaping_template_root() {
    let config = Config { template_root: PathBuf::from("../template"), ..Config::default() };
    let result = config.resolve("/work", None);
    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_resolve_rejects_invalid_verbatim_pattern() {
    let config = Config { verbatim: vec!["assets/[".to_string()], ..Config::default() };
    let result = config.resolve("/work", None);
    assert!(matches!(result, Err(Error::ConfigError(_))));
}
