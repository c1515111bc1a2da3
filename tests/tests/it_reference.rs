//! Integration tests for reference precedence on refable objects.

use pretty_assertions::assert_eq;
use swagspec::{
    DecodeOptions, DecodeStrategy, ErrorKind, Extensible, Parameter, Ref, Response, Schema, Tag,
    codec,
};

#[test]
fn encode_schema_with_reference_suppresses_declared_fields() {
    //* Given
    let mut schema = Schema::of_type("object")
        .description("shadowed")
        .with_extension("x-go-name", "Pet")
        .expect("should accept a prefixed extension key");
    schema.reference = Some(Ref::definition("Pet").expect("should build a definition reference"));

    //* When
    let json = codec::encode_to_string(&schema).expect("should encode the schema");

    //* Then
    insta::assert_snapshot!(json, @r##"{"$ref":"#/definitions/Pet","x-go-name":"Pet"}"##);
}

#[test]
fn decode_schema_with_reference_ignores_ill_typed_siblings() {
    //* Given
    let input = r##"{"type":7,"$ref":"#/definitions/Pet","bogus":[1,2],"x-go-name":"Pet"}"##;

    for strategy in DecodeStrategy::ALL {
        //* When
        let schema: Schema = codec::decode_str(input, DecodeOptions::new().strategy(strategy))
            .expect("siblings of `$ref` should be ignored");

        //* Then
        let reference = schema.reference.as_ref().expect("schema should be a reference");
        assert_eq!(reference.uri(), "#/definitions/Pet", "strategy: {strategy}");
        assert_eq!(schema.props, Default::default(), "strategy: {strategy}");
        assert_eq!(schema.extensions.get_string("x-go-name"), Some("Pet"));

        let json = codec::encode_to_string(&schema).expect("should re-encode the schema");
        assert_eq!(json, r##"{"$ref":"#/definitions/Pet","x-go-name":"Pet"}"##);
    }
}

#[test]
fn decode_reference_with_duplicate_key_in_shadowed_sibling_fails() {
    //* Given
    let input = r#"{"$ref":"cats","items":{"a":1,"a":2}}"#;

    for strategy in DecodeStrategy::ALL {
        //* When
        let result = codec::decode_str::<Schema>(input, DecodeOptions::new().strategy(strategy));

        //* Then
        let err = result.expect_err("duplicate keys are rejected even when shadowed");
        assert_eq!(err.kind(), ErrorKind::DuplicateKey, "strategy: {strategy}");
    }
}

#[test]
fn decode_empty_reference_fails() {
    //* Given
    let input = r#"{"$ref":""}"#;

    for strategy in DecodeStrategy::ALL {
        //* When
        let result = codec::decode_str::<Response>(input, DecodeOptions::new().strategy(strategy));

        //* Then
        let err = result.expect_err("an empty reference is invalid");
        assert_eq!(err.kind(), ErrorKind::EmptyReference, "strategy: {strategy}");
    }
}

#[test]
fn decode_reference_with_non_string_uri_fails() {
    //* Given
    let input = r#"{"$ref":["cats"]}"#;

    for strategy in DecodeStrategy::ALL {
        //* When
        let result = codec::decode_str::<Parameter>(input, DecodeOptions::new().strategy(strategy));

        //* Then
        let err = result.expect_err("a reference URI must be a string");
        assert_eq!(err.kind(), ErrorKind::TypeMismatch, "strategy: {strategy}");
        assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("$ref"));
    }
}

#[test]
fn decode_reference_on_non_refable_kind_fails() {
    //* Given
    let input = r#"{"$ref":"cats","name":"pets"}"#;

    for strategy in DecodeStrategy::ALL {
        //* When
        let result = codec::decode_str::<Tag>(input, DecodeOptions::new().strategy(strategy));

        //* Then
        let err = result.expect_err("tags cannot be references");
        assert_eq!(err.kind(), ErrorKind::InvalidExtensionKey, "strategy: {strategy}");
    }
}

#[test]
fn add_extension_named_ref_on_refable_kind_fails() {
    //* Given
    let mut schema = Schema::new();

    //* When
    let result = schema.add_extension("$ref", "cats");

    //* Then
    let err = result.expect_err("`$ref` is reserved on refable kinds");
    assert_eq!(err.kind(), ErrorKind::ExtensionCollision);
}

#[test]
fn ref_parse_and_serde_roundtrip() {
    //* Given
    let reference: Ref = "#/definitions/Pet".parse().expect("should parse a reference");

    //* When
    let json = serde_json::to_string(&reference).expect("should serialize the reference");
    let decoded: Ref = serde_json::from_str(&json).expect("should deserialize the reference");

    //* Then
    assert_eq!(json, r##"{"$ref":"#/definitions/Pet"}"##);
    assert_eq!(decoded, reference);
    assert!(reference.is_local());
    assert_eq!(
        "".parse::<Ref>().expect_err("empty URIs are rejected").kind(),
        ErrorKind::EmptyReference
    );
}
