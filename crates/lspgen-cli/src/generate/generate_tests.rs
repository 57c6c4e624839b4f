#![allow(non_snake_case)]

use super::*;
use tempfile::TempDir;

const FIXTURE: &str = include_str!("../../tests/fixtures/metaModel.json");

fn write_input(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// load_registry tests

#[test]
fn load_registry___single_file___extracts_everything() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "metaModel.json", FIXTURE);

    let registry = load_registry(&[input]).unwrap();

    assert_eq!(registry.version(), "3.17.0");
    assert!(registry.contains("Hover"));
    assert!(registry.requests().contains_key("textDocument/hover"));
}

#[test]
fn load_registry___two_files___merged_in_order() {
    let dir = TempDir::new().unwrap();
    let base = write_input(&dir, "base.json", FIXTURE);
    let extra = write_input(
        &dir,
        "extra.json",
        r#"{
            "metaData": { "version": "3.18.0" },
            "structures": [{ "name": "Extra", "properties": [] }]
        }"#,
    );

    let registry = load_registry(&[base, extra]).unwrap();

    assert_eq!(registry.version(), "3.18.0");
    assert!(registry.contains("Extra"));
    assert!(registry.contains("Trigger"));
}

#[test]
fn load_registry___missing_file___names_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.json");

    let err = load_registry(&[missing]).unwrap_err();

    assert!(format!("{err}").starts_with("Failed to read meta-model:"));
    assert!(format!("{err}").contains("nope.json"));
}

#[test]
fn load_registry___malformed_json___keeps_parse_error_as_cause() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "broken.json", "{\n  \"metaData\": ");

    let err = load_registry(&[input]).unwrap_err();

    assert!(format!("{err}").starts_with("Failed to load meta-model:"));
    assert!(format!("{err:#}").contains("JSON parse error"));
}

#[test]
fn load_registry___duplicate_across_files___fails() {
    let dir = TempDir::new().unwrap();
    let first = write_input(&dir, "a.json", FIXTURE);
    let second = write_input(&dir, "b.json", FIXTURE);

    let err = load_registry(&[first, second]).unwrap_err();

    assert!(format!("{err:#}").contains("duplicate type 'Trigger'"));
}

// write_artifacts tests

#[test]
fn write_artifacts___creates_directory_and_files() {
    let dir = TempDir::new().unwrap();
    let output = OutputSection {
        directory: dir.path().join("nested/out"),
        types: "t.rs".to_string(),
        serialization: "s.rs".to_string(),
        messages: "m.rs".to_string(),
    };
    let files = GeneratedFiles {
        types: "types".to_string(),
        serialization: "serialization".to_string(),
        messages: "messages".to_string(),
    };

    let written = write_artifacts(&files, &output).unwrap();

    assert_eq!(
        written,
        vec![
            output.directory.join("t.rs"),
            output.directory.join("s.rs"),
            output.directory.join("m.rs"),
        ]
    );
    assert_eq!(fs::read_to_string(&written[0]).unwrap(), "types");
    assert_eq!(fs::read_to_string(&written[1]).unwrap(), "serialization");
    assert_eq!(fs::read_to_string(&written[2]).unwrap(), "messages");
}

#[test]
fn run___fixture___writes_generated_sources() {
    let dir = TempDir::new().unwrap();
    let input = write_input(&dir, "metaModel.json", FIXTURE);
    let mut config = Config::default();
    config.output.directory = dir.path().join("generated");
    config.runtime.crate_path = "crate::runtime".to_string();

    run(&[input], &config).unwrap();

    let types = fs::read_to_string(dir.path().join("generated/types.rs")).unwrap();
    let messages = fs::read_to_string(dir.path().join("generated/messages.rs")).unwrap();
    assert!(types.contains("use crate::runtime::prelude::*;"));
    assert!(types.contains("pub const VERSION: &str = \"3.17.0\";"));
    assert!(messages.contains("pub struct TextDocument_Hover;"));
}
