//! Integration tests for vendor extensions.

use pretty_assertions::assert_eq;
use serde_json::json;
use swagspec::{
    DecodeOptions, DecodeStrategy, ErrorKind, Extensible, Extensions, Info, Operation, Schema,
    Swagger, Tag, codec,
};

#[test]
fn encode_extensions_in_lexical_order_regardless_of_insertion() {
    //* Given
    let mut forward = Tag::new("pets");
    let mut backward = Tag::new("pets");
    let keys = ["x-b", "x-a", "x-c", "x-A"];
    for (idx, key) in keys.iter().enumerate() {
        forward
            .add_extension(*key, idx)
            .expect("should accept a prefixed extension key");
    }
    for (idx, key) in keys.iter().enumerate().rev() {
        backward
            .add_extension(*key, idx)
            .expect("should accept a prefixed extension key");
    }

    //* When
    let first = codec::encode_to_string(&forward).expect("should encode the tag");
    let second = codec::encode_to_string(&backward).expect("should encode the tag");

    //* Then
    assert_eq!(first, second);
    insta::assert_snapshot!(first, @r#"{"name":"pets","x-A":3,"x-a":1,"x-b":0,"x-c":2}"#);
}

#[test]
fn add_extension_without_prefix_fails() {
    //* Given
    let mut info = Info::new("Pets", "1.0.0");

    //* When
    let result = info.add_extension("framework", "go-swagger");

    //* Then
    let err = result.expect_err("keys without the prefix are rejected");
    assert_eq!(err.kind(), ErrorKind::InvalidExtensionKey);
    assert!(info.extensions.is_empty());
}

#[test]
fn add_extension_with_uppercase_prefix_fails() {
    //* When
    let result = Extensions::new().with("X-framework", "go-swagger");

    //* Then
    let err = result.expect_err("the prefix check is case-sensitive");
    assert_eq!(err.kind(), ErrorKind::InvalidExtensionKey);
}

#[test]
fn add_extension_named_like_a_known_field_fails() {
    //* Given
    let mut operation = Operation::new();

    //* When
    let result = operation.add_extension("operationId", "listPets");

    //* Then
    let err = result.expect_err("known field keys cannot be extensions");
    assert_eq!(err.kind(), ErrorKind::ExtensionCollision);
}

#[test]
fn add_extension_twice_replaces_value() {
    //* Given
    let mut swagger = Swagger::default();
    swagger
        .add_extension("x-framework", "go-swagger")
        .expect("should accept a prefixed extension key");

    //* When
    let previous = swagger
        .add_extension("x-framework", "swagspec")
        .expect("should accept a prefixed extension key");

    //* Then
    assert_eq!(previous, Some(json!("go-swagger")));
    assert_eq!(swagger.extensions.get_string("x-framework"), Some("swagspec"));
    assert_eq!(swagger.extensions.len(), 1);
}

#[test]
fn decode_nested_extension_values_preserves_them_verbatim() {
    //* Given
    let input = r#"{"type":"object","x-nullable":true,"x-order":[3,1.5,"a",null],"x-meta":{"nested":{"deep":[{}]}},"x-empty":""}"#;

    for strategy in DecodeStrategy::ALL {
        //* When
        let schema: Schema = codec::decode_str(input, DecodeOptions::new().strategy(strategy))
            .expect("should decode the schema");

        //* Then
        let extensions = &schema.extensions;
        assert_eq!(extensions.get_bool("x-nullable"), Some(true));
        assert_eq!(extensions.get("x-order"), Some(&json!([3, 1.5, "a", null])));
        assert_eq!(extensions.get("x-meta"), Some(&json!({"nested": {"deep": [{}]}})));
        assert_eq!(extensions.get_string("x-empty"), Some(""));
        assert_eq!(
            extensions.keys().collect::<Vec<_>>(),
            vec!["x-empty", "x-meta", "x-nullable", "x-order"]
        );
    }
}

#[test]
fn extension_helpers_read_typed_values() {
    //* Given
    let extensions = Extensions::new()
        .with("x-tags", json!(["a", "b"]))
        .and_then(|ext| ext.with("x-mixed", json!(["a", 1])))
        .and_then(|ext| ext.with("x-flag", "yes"))
        .expect("should accept prefixed extension keys");

    //* Then
    assert_eq!(extensions.get_string_slice("x-tags"), Some(vec!["a", "b"]));
    assert_eq!(extensions.get_string_slice("x-mixed"), None);
    assert_eq!(extensions.get_bool("x-flag"), None);
    assert_eq!(extensions.get_string("x-missing"), None);
}

#[test]
fn remove_extension_drops_it_from_output() {
    //* Given
    let mut tag = Tag::new("pets")
        .with_extension("x-internal", true)
        .expect("should accept a prefixed extension key");

    //* When
    let removed = tag.extensions.remove("x-internal");

    //* Then
    assert_eq!(removed, Some(json!(true)));
    assert_eq!(
        codec::encode_to_string(&tag).expect("should encode the tag"),
        r#"{"name":"pets"}"#
    );
}
