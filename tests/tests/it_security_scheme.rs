//! Integration tests for security schemes.

use pretty_assertions::assert_eq;
use swagspec::{DecodeOptions, DecodeStrategy, SecurityScheme, codec};

#[test]
fn reencode_api_key_scheme_is_byte_identical() {
    //* Given
    let input = r#"{"type":"apiKey","in":"header","name":"api_key"}"#;

    for strategy in DecodeStrategy::ALL {
        //* When
        let scheme: SecurityScheme =
            codec::decode_str(input, DecodeOptions::new().strategy(strategy))
                .expect("should decode the security scheme");
        let json = codec::encode_to_string(&scheme).expect("should encode the security scheme");

        //* Then
        assert_eq!(json, input, "strategy: {strategy}");
        assert_eq!(scheme, SecurityScheme::api_key("api_key", "header"));
    }
}

#[test]
fn decode_scheme_with_shuffled_keys_encodes_in_declared_order() {
    //* Given
    let input = r#"{"name":"api_key","x-internal":true,"in":"query","type":"apiKey"}"#;

    //* When
    let scheme: SecurityScheme =
        codec::decode_str(input, DecodeOptions::new()).expect("should decode the security scheme");
    let json = codec::encode_to_string(&scheme).expect("should encode the security scheme");

    //* Then
    insta::assert_snapshot!(json, @r#"{"type":"apiKey","in":"query","name":"api_key","x-internal":true}"#);
}

#[test]
fn yaml_roundtrip_of_oauth2_implicit_scheme_preserves_scopes() {
    //* Given
    let scheme = SecurityScheme::oauth2_implicit("https://petstore.example/oauth/dialog")
        .scope("write:pets", "modify pets in your account")
        .scope("read:pets", "read your pets");

    //* When
    let yaml = serde_norway::to_string(&scheme).expect("should serialize the scheme to YAML");
    let decoded: SecurityScheme =
        serde_norway::from_str(&yaml).expect("should deserialize the scheme from YAML");

    //* Then
    assert_eq!(decoded, scheme);
    let scopes = decoded.props.scopes.keys().collect::<Vec<_>>();
    assert_eq!(scopes, vec!["read:pets", "write:pets"]);
}
