//! Integration tests for the JSON Schema and simple-type fields of Swagger 2.0:
//! composition, additional properties, XML metadata, parameter items and
//! validations, and response headers.

use pretty_assertions::assert_eq;
use serde_json::json;
use swagspec::{
    DecodeOptions, DecodeStrategy, ErrorKind, Header, Items, Parameter, Ref, Response, Schema,
    SchemaOrBool, Swagger, codec,
};

/// Decodes `input` with both strategies, checking that each re-encodes to `input`.
fn decode_canonical<T>(input: &str) -> [T; 2]
where
    T: codec::Decode + serde::Serialize,
{
    DecodeStrategy::ALL.map(|strategy| {
        let decoded: T = codec::decode_str(input, DecodeOptions::new().strategy(strategy))
            .unwrap_or_else(|err| panic!("{strategy} decoder should accept the input: {err}"));
        let reencoded = codec::encode_to_string(&decoded).expect("should encode the value");
        assert_eq!(reencoded, input, "{strategy} re-encoding differs");
        decoded
    })
}

#[test]
fn decode_definition_with_additional_properties_schema_keeps_it() {
    //* Given
    let input = r#"{"definitions":{"A":{"type":"object","additionalProperties":{"type":"string"}}}}"#;

    //* When
    let decoded = decode_canonical::<Swagger>(input);

    //* Then
    for swagger in decoded {
        let schema = &swagger.props.definitions["A"];
        assert_eq!(
            schema.props.additional_properties,
            Some(SchemaOrBool::Schema(Box::new(Schema::of_type("string"))))
        );
    }
}

#[test]
fn decode_schema_with_additional_properties_false_keeps_flag() {
    //* Given
    let input = r#"{"type":"object","maxProperties":4,"minProperties":1,"additionalProperties":false}"#;

    //* When
    let decoded = decode_canonical::<Schema>(input);

    //* Then
    for schema in decoded {
        assert_eq!(schema.props.additional_properties, Some(SchemaOrBool::Allows(false)));
        assert_eq!((schema.props.max_properties, schema.props.min_properties), (Some(4), Some(1)));
    }
}

#[test]
fn decode_schema_with_composition_keeps_every_branch() {
    //* Given
    let input = r##"{"allOf":[{"$ref":"#/definitions/Pet"},{"type":"object","required":["packSize"],"properties":{"packSize":{"type":"integer"}}}],"oneOf":[{"type":"string"}],"anyOf":[{"type":"number"}],"not":{"type":"null"}}"##;

    //* When
    let decoded = decode_canonical::<Schema>(input);

    //* Then
    let pet = Schema::from_ref(Ref::new("#/definitions/Pet").expect("valid reference"));
    let pack = Schema::object()
        .required("packSize")
        .property("packSize", Schema::of_type("integer"));
    for schema in decoded {
        assert_eq!(schema.props.all_of, vec![pet.clone(), pack.clone()]);
        assert_eq!(schema.props.one_of, vec![Schema::of_type("string")]);
        assert_eq!(schema.props.any_of, vec![Schema::of_type("number")]);
        assert_eq!(schema.props.not.as_deref(), Some(&Schema::of_type("null")));
    }
}

#[test]
fn decode_schema_with_xml_and_pattern_properties_keeps_them() {
    //* Given
    let input = r#"{"type":"object","patternProperties":{"^x-":{"type":"string"}},"xml":{"name":"animal","namespace":"http://example.com/schema","prefix":"ex","attribute":true,"wrapped":true}}"#;

    //* When
    let decoded = decode_canonical::<Schema>(input);

    //* Then
    for schema in decoded {
        assert_eq!(schema.props.pattern_properties["^x-"], Schema::of_type("string"));
        let xml = schema.props.xml.as_ref().expect("xml should be decoded");
        assert_eq!((xml.props.name.as_str(), xml.props.prefix.as_str()), ("animal", "ex"));
        assert!(xml.props.attribute && xml.props.wrapped);
    }
}

#[test]
fn decode_parameter_with_nested_items_keeps_array_layout() {
    //* Given
    let input = r#"{"name":"ids","in":"query","type":"array","items":{"type":"array","items":{"type":"integer","format":"int64","minimum":0.5},"collectionFormat":"pipes"},"collectionFormat":"csv"}"#;

    //* When
    let decoded = decode_canonical::<Parameter>(input);

    //* Then
    for parameter in decoded {
        let items = parameter.props.items.as_ref().expect("items should be decoded");
        assert_eq!(items.props.type_name, "array");
        assert_eq!(items.props.collection_format, "pipes");
        let nested = items.props.items.as_deref().expect("nested items should be decoded");
        assert_eq!((nested.props.type_name.as_str(), nested.props.format.as_str()), ("integer", "int64"));
        assert_eq!(nested.props.minimum, Some(0.5));
        assert_eq!(parameter.props.collection_format, "csv");
    }
}

#[test]
fn decode_parameter_with_validations_keeps_bounds_and_enum() {
    //* Given
    let input = r#"{"name":"limit","in":"query","type":"integer","default":20,"maximum":100.5,"exclusiveMaximum":true,"minimum":1.5,"enum":[10,20,50],"multipleOf":2.5}"#;

    //* When
    let decoded = decode_canonical::<Parameter>(input);

    //* Then
    for parameter in decoded {
        assert_eq!(parameter.props.default, json!(20));
        assert_eq!((parameter.props.maximum, parameter.props.minimum), (Some(100.5), Some(1.5)));
        assert!(parameter.props.exclusive_maximum);
        assert_eq!(parameter.props.enum_values, vec![json!(10), json!(20), json!(50)]);
        assert_eq!(parameter.props.multiple_of, Some(2.5));
    }
}

#[test]
fn decode_response_with_headers_keeps_them_by_name() {
    //* Given
    let input = r#"{"description":"pets page","headers":{"X-Rate-Limit":{"description":"calls per hour","type":"integer","format":"int32"},"X-Tags":{"type":"array","items":{"type":"string"},"collectionFormat":"csv"}}}"#;

    //* When
    let decoded = decode_canonical::<Response>(input);

    //* Then
    let rate_limit = Header::new("integer")
        .format("int32")
        .description("calls per hour");
    for response in decoded {
        assert_eq!(response.props.headers["X-Rate-Limit"], rate_limit);
        let tags = &response.props.headers["X-Tags"];
        assert_eq!(tags.props.items, Some(Items::new("string")));
        assert_eq!(tags.props.collection_format, "csv");
    }
}

#[test]
fn encode_built_parameter_and_response_writes_declared_order() {
    //* Given
    let parameter = Parameter::query("tags")
        .items(Items::new("string"), "multi")
        .enum_values(["a", "b"]);
    let response = Response::new("ok").header("X-Id", Header::new("string").format("uuid"));

    //* When
    let parameter_json = codec::encode_to_string(&parameter).expect("should encode the parameter");
    let response_json = codec::encode_to_string(&response).expect("should encode the response");

    //* Then
    assert_eq!(
        parameter_json,
        r#"{"name":"tags","in":"query","type":"array","items":{"type":"string"},"collectionFormat":"multi","enum":["a","b"]}"#
    );
    assert_eq!(
        response_json,
        r#"{"description":"ok","headers":{"X-Id":{"type":"string","format":"uuid"}}}"#
    );
}

#[test]
fn decode_items_with_unknown_key_fails_on_both_strategies() {
    //* Given
    let input = r#"{"name":"ids","in":"query","type":"array","items":{"type":"string","nullable":true}}"#;

    for strategy in DecodeStrategy::ALL {
        //* When
        let result = codec::decode_str::<Parameter>(input, DecodeOptions::new().strategy(strategy));

        //* Then
        let err = result.expect_err("items objects reject unknown keys");
        assert_eq!(err.kind(), ErrorKind::InvalidExtensionKey, "{strategy}");
        assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("items"), "{strategy}");
    }
}

#[test]
fn decode_additional_properties_with_string_fails_on_both_strategies() {
    //* Given
    let input = r#"{"type":"object","additionalProperties":"yes"}"#;

    for strategy in DecodeStrategy::ALL {
        //* When
        let result = codec::decode_str::<Schema>(input, DecodeOptions::new().strategy(strategy));

        //* Then
        let err = result.expect_err("additionalProperties is a boolean or a schema");
        assert_eq!(err.kind(), ErrorKind::TypeMismatch, "{strategy}");
    }
}
