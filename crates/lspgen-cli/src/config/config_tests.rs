#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// Config parsing tests

#[test]
fn Config___from_str___parses_full_config() {
    let toml = r#"
log_level = "debug"

[output]
directory = "src/generated"
types = "lsp_types.rs"
serialization = "lsp_serde.rs"
messages = "lsp_messages.rs"

[runtime]
crate_path = "crate::runtime"
"#;

    let config = Config::from_str(toml).unwrap();

    assert_eq!(config.output.directory, PathBuf::from("src/generated"));
    assert_eq!(config.output.types, "lsp_types.rs");
    assert_eq!(config.output.serialization, "lsp_serde.rs");
    assert_eq!(config.output.messages, "lsp_messages.rs");
    assert_eq!(config.runtime.crate_path, "crate::runtime");
    assert_eq!(config.log_level, "debug");
}

#[test]
fn Config___from_str___empty_uses_defaults() {
    let config = Config::from_str("").unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.output.directory, PathBuf::from("."));
    assert_eq!(config.output.types, "types.rs");
    assert_eq!(config.runtime.crate_path, "lsp_runtime");
    assert_eq!(config.log_level, "warn");
}

#[test]
fn Config___from_str___partial_section_keeps_other_defaults() {
    let config = Config::from_str("[output]\ntypes = \"t.rs\"\n").unwrap();

    assert_eq!(config.output.types, "t.rs");
    assert_eq!(config.output.messages, "messages.rs");
}

#[test]
fn Config___from_str___unknown_key___fails() {
    let result = Config::from_str("[output]\nfolder = \"x\"\n");

    assert!(result.is_err());
}

#[test]
fn Config___from_file___missing_file___reports_path() {
    let err = Config::from_file("does/not/exist/lspgen.toml").unwrap_err();

    assert!(err.to_string().contains("Failed to read config"));
}

// Config validation tests

#[test]
fn Config___validate___accepts_defaults() {
    assert!(Config::default().validate().is_ok());
}

#[test]
fn Config___validate___rejects_empty_file_name() {
    let mut config = Config::default();
    config.output.serialization = String::new();

    let err = config.validate().unwrap_err();

    assert_eq!(err.to_string(), "output.serialization cannot be empty");
}

#[test]
fn Config___validate___rejects_unknown_log_level() {
    let config = Config {
        log_level: "loud".to_string(),
        ..Config::default()
    };

    assert!(config.validate().is_err());
}

#[test_case("lsp_runtime", true ; "plain crate")]
#[test_case("crate::runtime", true ; "nested module")]
#[test_case("::lsp_runtime", true ; "absolute path")]
#[test_case("", false ; "empty")]
#[test_case("lsp-runtime", false ; "dash")]
#[test_case("a::::b", false ; "empty segment")]
#[test_case("1runtime", false ; "leading digit")]
#[test_case("_", false ; "underscore only")]
fn is_valid_crate_path___checks_segments(path: &str, expected: bool) {
    assert_eq!(is_valid_crate_path(path), expected);
}

#[test]
fn Config___generator_options___carries_runtime_path() {
    let mut config = Config::default();
    config.runtime.crate_path = "crate::rt".to_string();

    assert_eq!(config.generator_options().runtime_crate, "crate::rt");
}
