use super::*;
use crate::args::CliArgs;
use clap::Parser;
use serde_json::{Value, json};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn no_env(_: &str) -> Option<String> {
    None
}

fn write(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
    path
}

fn run_to_json(argv: &[&str], lookup: impl Fn(&str) -> Option<String>) -> Value {
    let args = CliArgs::try_parse_from(argv).unwrap();
    let mut out = Vec::new();
    run(&args.command, lookup, &mut out).unwrap();
    serde_json::from_slice(&out).unwrap()
}

fn stub_fixture() -> Value {
    json!([
        {
            "kind": "function",
            "name": {"namespaced_name": {"parts": ["str_contains"]}},
            "type_annotation": {"kind": "identifier", "name": "bool"},
            "attr_groups": [{"attrs": [{
                "name": {"parts": ["PhpStormStubsElementAvailable"]},
                "args": [{"value": {"kind": "string", "value": "8.0"}}]
            }]}],
            "location": "standard/str.php:10"
        },
        {
            "kind": "function",
            "name": {"namespaced_name": {"parts": ["each"]}},
            "removed": ["8.0"]
        },
        {
            "kind": "function",
            "name": {"namespaced_name": {"parts": ["each"]}},
            "removed": ["8.0"]
        },
        {
            "kind": "function",
            "name": {"namespaced_name": {"parts": ["broken"]}},
            "attr_groups": [{"attrs": [{
                "name": {"parts": ["PhpStormStubsElementAvailable"]},
                "args": []
            }]}]
        }
    ])
}

#[test]
fn test_cli_parses_resolve_flags() {
    let args = CliArgs::try_parse_from([
        "stubcheck",
        "resolve",
        "--stubs",
        "decls.json",
        "--runtime-version",
        "8.1",
        "--separator",
        ".",
        "--pretty",
    ])
    .unwrap();
    let Command::Resolve(resolve) = args.command else {
        panic!("expected the resolve command");
    };
    assert_eq!(resolve.stubs, PathBuf::from("decls.json"));
    assert_eq!(resolve.context.runtime_version, Some(Version::new(8.1).unwrap()));
    assert_eq!(resolve.context.separator.as_deref(), Some("."));
    assert!(resolve.context.pretty);

    assert!(CliArgs::try_parse_from(["stubcheck", "resolve"]).is_err());
    assert!(
        CliArgs::try_parse_from(["stubcheck", "versions", "--runtime-version", "eight"]).is_err()
    );
}

#[test]
fn test_context_precedence() {
    let dir = TempDir::new().unwrap();
    let config = write(
        &dir,
        "stubcheck.json",
        &json!({"versions": ["7.4", "8.0", "8.1"], "current_version": "7.4", "separator": "::"}),
    );

    let from_file = ContextArgs {
        config: Some(config.clone()),
        ..ContextArgs::default()
    };
    let ctx = build_context(&from_file, no_env).unwrap();
    assert_eq!(ctx.current_version(), Version::new(7.4).unwrap());
    assert_eq!(ctx.separator(), "::");
    assert_eq!(ctx.registry().len(), 3);

    let env = |var: &str| (var == "PHP_VERSION").then(|| "8.0".to_string());
    let ctx = build_context(&from_file, env).unwrap();
    assert_eq!(ctx.current_version(), Version::new(8.0).unwrap());

    let flags = ContextArgs {
        config: Some(config),
        runtime_version: Some(Version::new(8.1).unwrap()),
        separator: Some(".".to_string()),
        pretty: false,
    };
    let ctx = build_context(&flags, env).unwrap();
    assert_eq!(ctx.current_version(), Version::new(8.1).unwrap());
    assert_eq!(ctx.separator(), ".");
}

#[test]
fn test_missing_config_is_reported_with_path() {
    let args = ContextArgs {
        config: Some(PathBuf::from("/nonexistent/stubcheck.json")),
        ..ContextArgs::default()
    };
    let error = build_context(&args, no_env).unwrap_err();
    assert!(format!("{error:#}").contains("/nonexistent/stubcheck.json"));
}

#[test]
fn test_resolve_command_output() {
    let dir = TempDir::new().unwrap();
    let stubs = write(&dir, "decls.json", &stub_fixture());
    let reflection = write(
        &dir,
        "reflection.json",
        &json!([{"kind": "function", "name": "str_contains", "type": {"kind": "named", "name": "bool"}}]),
    );
    let muted = write(&dir, "muted.json", &json!({"each": {"2": ["ALL"]}}));

    let output = run_to_json(
        &[
            "stubcheck",
            "resolve",
            "--stubs",
            stubs.to_str().unwrap(),
            "--reflection",
            reflection.to_str().unwrap(),
            "--muted",
            muted.to_str().unwrap(),
            "--runtime-version",
            "7.4",
        ],
        no_env,
    );

    assert_eq!(output["current_version"], json!(7.4));
    let stubs = output["stubs"].as_array().unwrap();
    assert_eq!(stubs.len(), 4);

    assert_eq!(stubs[0]["kind"], "function");
    assert_eq!(stubs[0]["header"]["name"], "str_contains");
    assert_eq!(stubs[0]["header"]["availability"]["from"], json!(8.0));
    assert_eq!(stubs[0]["valid_for_current_version"], false);

    assert_eq!(stubs[1]["valid_for_current_version"], true);
    assert_eq!(stubs[1]["header"]["muted_problems"], json!({"2": ["ALL"]}));
    assert_eq!(stubs[1]["header"]["is_duplicate"], false);
    assert_eq!(stubs[2]["header"]["is_duplicate"], true);

    assert_eq!(
        stubs[3]["header"]["parse_error"],
        "`PhpStormStubsElementAvailable` has 0 arguments"
    );
    assert_eq!(stubs[3]["valid_for_current_version"], false);

    let reflection = output["reflection"].as_array().unwrap();
    assert_eq!(reflection[0]["return_type"]["from_signature"], json!(["bool"]));
    assert_eq!(reflection[0]["valid_for_current_version"], true);
}

#[test]
fn test_versions_command() {
    let output = run_to_json(
        &["stubcheck", "versions"],
        |var: &str| (var == "STUBCHECK_RUNTIME_VERSION").then(|| "8.2".to_string()),
    );
    assert_eq!(output["current_version"], json!(8.2));
    assert_eq!(output["separator"], "\\");
    assert_eq!(output["versions"][0], json!(5.3));
    assert_eq!(output["versions"].as_array().unwrap().len(), 14);
}

#[test]
fn test_unreadable_stubs_fail_with_context() {
    let args = CliArgs::try_parse_from(["stubcheck", "resolve", "--stubs", "/nonexistent/decls.json"])
        .unwrap();
    let mut out = Vec::new();
    let error = run(&args.command, no_env, &mut out).unwrap_err();
    assert!(format!("{error:#}").contains("failed to read stub declarations"));
    assert!(out.is_empty());
}
