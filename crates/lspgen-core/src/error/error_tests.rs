#![allow(non_snake_case)]

use super::*;

#[test]
fn MetaModelError___from_serde_error___keeps_position() {
    let json_err = serde_json::from_str::<serde_json::Value>("{\n  \"a\": ,\n}").unwrap_err();

    let err: MetaModelError = json_err.into();

    match err {
        MetaModelError::Json { line, column, .. } => {
            assert_eq!(line, 2);
            assert!(column > 0);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn MetaModelError___json___display_includes_position() {
    let json_err = serde_json::from_str::<serde_json::Value>("[1, 2").unwrap_err();

    let display = MetaModelError::from(json_err).to_string();

    assert!(display.starts_with("JSON parse error: "));
    assert!(display.contains("line 1"));
}

#[test]
fn MetaModelError___unknown_type_kind___displays_correctly() {
    let err = MetaModelError::UnknownTypeKind("set".into());

    assert_eq!(err.to_string(), "'set' is not a valid type kind");
}

#[test]
fn MetaModelError___duplicate_method___names_kind() {
    let err = MetaModelError::DuplicateMethod {
        kind: "notification",
        method: "exit".into(),
    };

    assert_eq!(err.to_string(), "duplicate notification method: exit");
}

#[test]
fn MetaModelError___missing_field___names_context() {
    let err = MetaModelError::missing("name", "structure");

    assert_eq!(err.to_string(), "missing field 'name' in structure");
}

#[test]
fn MetaModelError___name_not_found___displays_correctly() {
    let err = MetaModelError::NameNotFound("Position".into());

    assert_eq!(err.to_string(), "type with name 'Position' does not exist");
}
