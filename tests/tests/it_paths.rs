//! Integration tests for the paths collection.

use pretty_assertions::assert_eq;
use swagspec::{
    DecodeOptions, DecodeStrategy, ErrorKind, Operation, Parameter, PathItem, Paths, Response,
    Responses, codec,
};

#[test]
fn decode_paths_with_extension_and_reference_succeeds() {
    //* Given
    let input = r#"{"x-framework":"go-swagger","/":{"$ref":"cats"}}"#;

    for strategy in DecodeStrategy::ALL {
        //* When
        let paths: Paths = codec::decode_str(input, DecodeOptions::new().strategy(strategy))
            .expect("should decode paths");

        //* Then
        assert_eq!(
            paths.extensions.get_string("x-framework"),
            Some("go-swagger"),
            "strategy: {strategy}"
        );
        let item = paths.get("/").expect("path `/` should be present");
        let reference = item
            .reference
            .as_ref()
            .expect("path item should be a reference");
        assert_eq!(reference.uri(), "cats", "strategy: {strategy}");
        assert_eq!(item.operations().count(), 0);
    }
}

#[test]
fn encode_paths_writes_paths_before_extensions() {
    //* Given
    let input = br#"{"x-framework":"go-swagger","/":{"$ref":"cats"}}"#;
    let paths: Paths =
        codec::decode(input, DecodeOptions::new()).expect("should decode paths");

    //* When
    let json = codec::encode_to_string(&paths).expect("should encode paths");

    //* Then
    insta::assert_snapshot!(json, @r#"{"/":{"$ref":"cats"},"x-framework":"go-swagger"}"#);
}

#[test]
fn decode_paths_with_non_path_key_fails_on_both_strategies() {
    //* Given
    let input = r#"{"pets":{}}"#;

    for strategy in DecodeStrategy::ALL {
        //* When
        let result = codec::decode_str::<Paths>(input, DecodeOptions::new().strategy(strategy));

        //* Then
        let err = result.expect_err("keys must be paths or extensions");
        assert_eq!(err.kind(), ErrorKind::InvalidExtensionKey, "strategy: {strategy}");
    }
}

#[test]
fn decode_nested_operation_reports_full_field_path() {
    //* Given
    let input = r#"{"/pets":{"get":{"responses":{"200":{"description":7}}}}}"#;

    for strategy in DecodeStrategy::ALL {
        //* When
        let result = codec::decode_str::<Paths>(input, DecodeOptions::new().strategy(strategy));

        //* Then
        let err = result.expect_err("a number is not a description");
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        let path = err.path().expect("type mismatches carry a path").to_string();
        assert_eq!(path, "/pets.get.responses.200.description", "strategy: {strategy}");
    }
}

#[test]
fn roundtrip_path_item_with_operations_preserves_order() {
    //* Given
    let item = PathItem::new()
        .get(
            Operation::new()
                .operation_id("listPets")
                .tag("pets")
                .parameter(Parameter::query("limit").typed("integer", "int32"))
                .responses(
                    Responses::new()
                        .status(200, Response::new("a page of pets"))
                        .default_response(Response::new("unexpected error")),
                ),
        )
        .parameters(vec![Parameter::header("x-request-id").typed("string", "")]);
    let paths = Paths::new()
        .path("/pets", item)
        .expect("should accept a path key");

    //* When
    let json = codec::encode_to_string(&paths).expect("should encode paths");
    let decoded: Paths = codec::decode_str(&json, DecodeOptions::new().strategy(DecodeStrategy::Optimized))
        .expect("should decode encoded paths");

    //* Then
    assert_eq!(decoded, paths);
    insta::assert_snapshot!(json, @r#"{"/pets":{"get":{"tags":["pets"],"operationId":"listPets","parameters":[{"name":"limit","in":"query","type":"integer","format":"int32"}],"responses":{"default":{"description":"unexpected error"},"200":{"description":"a page of pets"}}},"parameters":[{"name":"x-request-id","in":"header","type":"string"}]}}"#);
}
