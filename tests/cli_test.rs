use clap::Parser;
use materializer::cli::Args;
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("materialize")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_defaults() {
    let parsed = Args::try_parse_from(make_args(&[])).unwrap();

    assert_eq!(parsed.working_dir, PathBuf::from("."));
    assert_eq!(parsed.template_root, None);
    assert_eq!(parsed.config, None);
    assert!(!parsed.stdin);
    assert!(!parsed.verbose);
}

#[test]
fn test_all_flags() {
    let args = make_args(&[
        "--template-root",
        "skeleton",
        "--config",
        "custom.yaml",
        "--stdin",
        "--verbose",
        "./repo",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.working_dir, PathBuf::from("./repo"));
    assert_eq!(parsed.template_root, Some(PathBuf::from("skeleton")));
    assert_eq!(parsed.config, Some(PathBuf::from("custom.yaml")));
    assert!(parsed.stdin);
    assert!(parsed.verbose);
}

#[test]
fn test_short_flags() {
    let args = make_args(&["-t", "skeleton", "-c", "custom.json", "-s", "-v"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.template_root, Some(PathBuf::from("skeleton")));
    assert_eq!(parsed.config, Some(PathBuf::from("custom.json")));
    assert!(parsed.stdin);
    assert!(parsed.verbose);
}

#[test]
fn test_too_many_args() {
    let args = make_args(&["./repo", "extra"]);
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn test_missing_option_value() {
    let args = make_args(&["--template-root"]);
    assert!(Args::try_parse_from(args).is_err());
}
