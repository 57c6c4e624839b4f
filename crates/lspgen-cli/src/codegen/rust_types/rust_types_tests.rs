#![allow(non_snake_case)]

use super::*;
use lspgen_core::{MetaModelError, Registry};
use serde_json::json;
use test_case::test_case;

fn registry() -> Registry {
    Registry::from_json(&json!({
        "metaData": { "version": "1" },
        "enumerations": [{
            "name": "Trigger",
            "type": { "kind": "base", "name": "string" },
            "values": [{ "name": "Manual", "value": "manual" }]
        }],
        "structures": [{ "name": "Hover", "properties": [] }],
        "typeAliases": [
            { "name": "ChangeAnnotationIdentifier", "type": { "kind": "base", "name": "string" } },
            { "name": "Pattern", "type": { "kind": "reference", "name": "ChangeAnnotationIdentifier" } },
            { "name": "Count", "type": { "kind": "base", "name": "integer" } }
        ]
    }))
    .unwrap()
}

fn parse(value: serde_json::Value) -> Type {
    Type::from_json(&value).unwrap()
}

fn base(name: &str) -> serde_json::Value {
    json!({ "kind": "base", "name": name })
}

fn reference(name: &str) -> serde_json::Value {
    json!({ "kind": "reference", "name": name })
}

#[test_case(BaseType::Boolean, "bool")]
#[test_case(BaseType::String, "String")]
#[test_case(BaseType::Integer, "i32")]
#[test_case(BaseType::UInteger, "u32")]
#[test_case(BaseType::Decimal, "f64")]
#[test_case(BaseType::Uri, "Uri")]
#[test_case(BaseType::DocumentUri, "DocumentUri")]
#[test_case(BaseType::RegExp, "String")]
#[test_case(BaseType::Null, "Null")]
fn base_type_name___maps_primitives(base: BaseType, expected: &str) {
    assert_eq!(base_type_name(base), expected);
}

#[test]
fn rust_type___enumeration_reference___gets_enum_suffix() {
    let registry = registry();
    let generator = Generator::new(&registry);

    assert_eq!(generator.rust_type(&parse(reference("Trigger")), "", false).unwrap(), "TriggerEnum");
    assert_eq!(generator.rust_type(&parse(reference("Hover")), "", false).unwrap(), "Hover");
}

#[test]
fn rust_type___unknown_reference___fails() {
    let registry = registry();
    let generator = Generator::new(&registry);

    let err = generator
        .rust_type(&parse(reference("Nope")), "", false)
        .unwrap_err();

    assert!(matches!(err, MetaModelError::NameNotFound(name) if name == "Nope"));
}

#[test]
fn rust_type___array_of_any___is_raw_array() {
    let registry = registry();
    let generator = Generator::new(&registry);

    let any = parse(json!({ "kind": "array", "element": reference("LSPAny") }));
    let hovers = parse(json!({ "kind": "array", "element": reference("Hover") }));

    assert_eq!(generator.rust_type(&any, "", false).unwrap(), "LSPArray");
    assert_eq!(generator.rust_type(&hovers, "", false).unwrap(), "Vec<Hover>");
}

#[test_case(base("string"), "StrMap<String, Hover>" ; "string key")]
#[test_case(base("DocumentUri"), "StrMap<DocumentUri, Hover>" ; "uri key")]
#[test_case(reference("Pattern"), "StrMap<Pattern, Hover>" ; "alias chain to string")]
#[test_case(reference("Count"), "HashMap<Count, Hover>" ; "alias to integer")]
#[test_case(base("integer"), "HashMap<i32, Hover>" ; "integer key")]
#[test_case(reference("Trigger"), "HashMap<TriggerEnum, Hover>" ; "enumeration key")]
fn rust_type___map___picks_map_by_key(key: serde_json::Value, expected: &str) {
    let registry = registry();
    let generator = Generator::new(&registry);

    let map = parse(json!({ "kind": "map", "key": key, "value": reference("Hover") }));

    assert_eq!(generator.rust_type(&map, "", false).unwrap(), expected);
}

#[test]
fn rust_type___intersection___is_untyped_object() {
    let registry = registry();
    let generator = Generator::new(&registry);

    let and = parse(json!({ "kind": "and", "items": [reference("Hover"), reference("Hover")] }));

    assert_eq!(generator.rust_type(&and, "", false).unwrap(), "LSPObject");
}

#[test_case(json!([reference("Hover")]), "Hover" ; "single member")]
#[test_case(json!([reference("Hover"), base("null")]), "NullOr<Hover>" ; "nullable")]
#[test_case(json!([base("null"), base("string"), base("integer")]), "NullOrOneOf2<String, i32>" ; "nullable one of")]
#[test_case(json!([base("string"), base("integer")]), "OneOf2<String, i32>" ; "one of")]
#[test_case(json!([base("null"), base("string"), base("null")]), "NullOrOneOf2<String, Null>" ; "only first null skipped")]
fn rust_type___union___wraps_members(items: serde_json::Value, expected: &str) {
    let registry = registry();
    let generator = Generator::new(&registry);

    let union = parse(json!({ "kind": "or", "items": items }));

    assert_eq!(generator.rust_type(&union, "Scope", false).unwrap(), expected);
}

#[test]
fn rust_type___tuple___is_product() {
    let registry = registry();
    let generator = Generator::new(&registry);

    let pair = parse(json!({ "kind": "tuple", "items": [base("uinteger"), base("uinteger")] }));
    let single = parse(json!({ "kind": "tuple", "items": [base("string")] }));

    assert_eq!(generator.rust_type(&pair, "", false).unwrap(), "(u32, u32)");
    assert_eq!(generator.rust_type(&single, "", false).unwrap(), "(String,)");
}

#[test]
fn rust_type___tuple_literal_in_alias___uses_element_scope() {
    let registry = registry();
    let generator = Generator::new(&registry);

    let tuple = parse(json!({
        "kind": "tuple",
        "items": [{
            "kind": "literal",
            "value": { "properties": [{ "name": "start", "type": base("uinteger") }] }
        }]
    }));

    assert_eq!(generator.rust_type(&tuple, "Span", true).unwrap(), "(Span_Element_Start,)");
    assert_eq!(generator.rust_type(&tuple, "Span", false).unwrap(), "(Span_Start,)");
}

#[test_case(json!({ "kind": "stringLiteral", "value": "x" }), "String" ; "string literal")]
#[test_case(json!({ "kind": "integerLiteral", "value": 1 }), "i32" ; "integer literal")]
#[test_case(json!({ "kind": "booleanLiteral", "value": true }), "bool" ; "boolean literal")]
fn rust_type___value_literal___is_primitive(value: serde_json::Value, expected: &str) {
    let registry = registry();
    let generator = Generator::new(&registry);

    assert_eq!(generator.rust_type(&parse(value), "", false).unwrap(), expected);
}

#[test]
fn property_type___optional___wraps_in_option() {
    let registry = registry();
    let generator = Generator::new(&registry);

    let ty = generator
        .property_type(&parse(reference("Hover")), "", true)
        .unwrap();

    assert_eq!(ty, PropertyType { text: "Option<Hover>".to_string(), boxed: false });
}

#[test]
fn property_type___reference_in_progress___is_boxed() {
    let registry = registry();
    let mut generator = Generator::new(&registry);
    generator.being_processed.insert("Hover");

    let optional = generator
        .property_type(&parse(reference("Hover")), "", true)
        .unwrap();
    let required = generator
        .property_type(&parse(reference("Hover")), "", false)
        .unwrap();

    assert_eq!(optional.text, "Option<Box<Hover>>");
    assert!(optional.boxed);
    assert_eq!(required.text, "Hover");
}

#[test]
fn property_type___array_of_type_in_progress___not_boxed() {
    let registry = registry();
    let mut generator = Generator::new(&registry);
    generator.being_processed.insert("Hover");

    let ty = generator
        .property_type(&parse(json!({ "kind": "array", "element": reference("Hover") })), "", true)
        .unwrap();

    assert_eq!(ty.text, "Option<Vec<Hover>>");
}
