//! Integration tests for decode failures and their parity across strategies.
//!
//! Every input below holds a single fault, so both strategies must report the same
//! kind of error. For inputs with several faults only the occurrence of an error is
//! guaranteed to match.

use pretty_assertions::assert_eq;
use swagspec::{DecodeOptions, DecodeStrategy, Error, ErrorKind, Schema, Swagger, codec};

fn decode_with_both<T: codec::Decode>(input: &str, options: DecodeOptions) -> [swagspec::Result<T>; 2] {
    DecodeStrategy::ALL.map(|strategy| codec::decode_str(input, options.strategy(strategy)))
}

fn assert_fails_with(input: &str, expected: ErrorKind) {
    for (strategy, result) in DecodeStrategy::ALL
        .into_iter()
        .zip(decode_with_both::<Swagger>(input, DecodeOptions::new()))
    {
        let err = result.expect_err(&format!("{strategy} decoder should reject {input}"));
        assert_eq!(err.kind(), expected, "strategy: {strategy}, input: {input}, error: {err}");
    }
}

#[test]
fn decode_non_object_root_fails_as_not_an_object() {
    assert_fails_with("[]", ErrorKind::NotAnObject);
    assert_fails_with("\"swagger\"", ErrorKind::NotAnObject);
    assert_fails_with("null", ErrorKind::NotAnObject);
}

#[test]
fn decode_malformed_json_fails_as_syntax_error() {
    let inputs = [
        "",
        "{",
        r#"{"swagger":}"#,
        r#"{"swagger":"2.0",}"#,
        r#"{"swagger":"2.0"} {}"#,
        r#"{"x-a": 01}"#,
        r#"{"x-a": 1.}"#,
        r#"{"x-a": -}"#,
        r#"{"x-a": 1e}"#,
        r#"{"x-a": tru}"#,
        r#"{"x-a": "\x"}"#,
        r#"{"x-a": "\ud800"}"#,
        "{\"x-a\": \"tab\there\"}",
    ];
    for input in inputs {
        assert_fails_with(input, ErrorKind::Syntax);
    }
}

#[test]
fn decode_field_of_wrong_type_fails_with_field_path() {
    //* Given
    let input = r#"{"info":{"title":["Pets"]}}"#;

    for result in decode_with_both::<Swagger>(input, DecodeOptions::new()) {
        //* When
        let err = result.expect_err("a title must be a string");

        //* Then
        let Error::TypeMismatch { path, expected, found } = &err else {
            panic!("expected a type mismatch, got {err:?}");
        };
        assert_eq!(path.to_string(), "info.title");
        assert_eq!(*expected, "string");
        assert_eq!(*found, "array");
    }
}

#[test]
fn decode_fractional_integer_field_fails_as_type_mismatch() {
    //* Given
    let input = r#"{"maxLength":1.5}"#;

    for result in decode_with_both::<Schema>(input, DecodeOptions::new()) {
        //* Then
        let err = result.expect_err("maxLength must be an integer");
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.path().map(ToString::to_string).as_deref(), Some("maxLength"));
    }
}

#[test]
fn decode_duplicate_keys_fails_at_any_depth() {
    assert_fails_with(r#"{"swagger":"2.0","swagger":"2.0"}"#, ErrorKind::DuplicateKey);
    assert_fails_with(r#"{"x-a":{"b":1,"b":1}}"#, ErrorKind::DuplicateKey);
    assert_fails_with(
        r#"{"definitions":{"Pet":{},"Pet":{}}}"#,
        ErrorKind::DuplicateKey,
    );
}

#[test]
fn decode_unknown_keys_fails_as_invalid_extension_key() {
    assert_fails_with(r#"{"Swagger":"2.0"}"#, ErrorKind::InvalidExtensionKey);
    assert_fails_with(r#"{"X-framework":"go-swagger"}"#, ErrorKind::InvalidExtensionKey);
    assert_fails_with(r#"{"tags":[{"name":"pets","color":"red"}]}"#, ErrorKind::InvalidExtensionKey);
}

#[test]
fn decode_nesting_beyond_limit_fails_on_both_strategies() {
    //* Given
    let input = r#"{"x-a":[[[]]]}"#;

    //* When
    let at_limit = decode_with_both::<Swagger>(input, DecodeOptions::new().max_depth(4));
    let over_limit = decode_with_both::<Swagger>(input, DecodeOptions::new().max_depth(3));

    //* Then
    for result in at_limit {
        result.expect("four levels should fit a limit of four");
    }
    for result in over_limit {
        let err = result.expect_err("four levels should exceed a limit of three");
        assert!(matches!(err, Error::DepthLimitExceeded { limit: 3 }), "got {err:?}");
    }
}

#[test]
fn decode_deeply_nested_input_fails_without_exhausting_the_stack() {
    //* Given
    let depth = 10_000;
    let input = format!(r#"{{"x-a":{}{}}}"#, "[".repeat(depth), "]".repeat(depth));

    //* Then
    assert_fails_with(&input, ErrorKind::DepthLimitExceeded);
}

#[test]
fn decode_options_clamp_depth_to_ceiling() {
    //* When
    let options = DecodeOptions::new().max_depth(usize::MAX);

    //* Then
    assert_eq!(options.max_depth, codec::MAX_DEPTH_CEILING);
}

#[test]
fn decode_options_load_from_configuration() {
    //* Given
    let config = r#"{"strategy":"optimized"}"#;

    //* When
    let options: DecodeOptions =
        serde_json::from_str(config).expect("should deserialize decode options");

    //* Then
    assert_eq!(options.strategy, DecodeStrategy::Optimized);
    assert_eq!(options.max_depth, codec::DEFAULT_MAX_DEPTH);
    assert_eq!(
        "general".parse::<DecodeStrategy>().expect("should parse a strategy name"),
        DecodeStrategy::General
    );
    assert!("fast".parse::<DecodeStrategy>().is_err());
    assert_eq!(DecodeStrategy::Optimized.to_string(), "optimized");
}

#[test]
fn check_bytes_with_edge_inputs_agrees_across_strategies() {
    let inputs = [
        r#"{}"#,
        r#"  {"swagger" : "2.0" }  "#,
        r#"{"x-big":18446744073709551616,"x-neg":-9223372036854775808,"x-f":-0.5e-3}"#,
        r#"{"x-s":"é😀\/\b"}"#,
        r#"{"definitions":{"A":{"type":["string","null"],"maximum":10}}}"#,
        r##"{"definitions":{"A":{"$ref":"#/definitions/B","type":{"a":1}}}}"##,
        r#"{"paths":{"/":{"$ref":"cats","get":[]}}}"#,
        r#"{"paths":{"x-a":null}}"#,
        r#"{"paths":{"/a":{"get":{"responses":{"default":{"description":""},"x-r":1}}}}}"#,
        r#"{"paths":{"/a":{"get":{"responses":{"0200":{"description":""}}}}}}"#,
        r#"{"info":null,"paths":null,"externalDocs":null}"#,
        r#"{"tags":[{"name":"a"},{"$ref":"b"}]}"#,
        r#"{"security":[{"k":[]},{"k":["a","b"]}]}"#,
        r#"{"swagger":"2.0""#,
    ];
    for input in inputs {
        if let Err(failure) = testlib::oracle::check_bytes::<Swagger>(input.as_bytes()) {
            panic!("strategies disagree on {input}: {failure}");
        }
    }
}
