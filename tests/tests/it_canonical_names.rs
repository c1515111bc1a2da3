//! Integration tests for canonical definition names.
//!
//! A type either declares its model name or gets one derived from its module path.
//! Either way the definition lands in the document under exactly that name.

use pretty_assertions::assert_eq;
use swagspec::{Info, Schema, Swagger, ToSchema, canonical_type_name};

mod namedmodels {
    use swagspec::{Schema, ToSchema};

    pub const MODEL_PACKAGE: &str = "io.swagspec.tests.namedmodels";

    /// Declares its name through the model package.
    pub struct Struct;

    impl ToSchema for Struct {
        fn schema() -> Schema {
            Schema::object()
                .property("Field", ContainedStruct::schema())
                .property("OtherField", i64::schema())
                .required("Field")
        }

        fn model_name() -> Option<String> {
            Some(format!("{MODEL_PACKAGE}.Struct"))
        }
    }

    /// Falls back to the module path.
    pub struct ContainedStruct;

    impl ToSchema for ContainedStruct {
        fn schema() -> Schema {
            Schema::object()
        }
    }

    /// Declares its name by hand.
    pub struct AtomicStruct;

    impl ToSchema for AtomicStruct {
        fn schema() -> Schema {
            Schema::object().property("Field", i64::schema())
        }

        fn model_name() -> Option<String> {
            Some("io.swagspec.tests.namedmodels.AtomicStruct".to_owned())
        }
    }
}

use namedmodels::{AtomicStruct, ContainedStruct, Struct};

#[test]
fn add_definition_registers_every_type_under_its_canonical_name() {
    //* Given
    let mut swagger = Swagger::new(Info::new("Named models", "1.0.0"));

    //* When
    let refs = [
        swagger.add_definition::<Struct>(),
        swagger.add_definition::<ContainedStruct>(),
        swagger.add_definition::<AtomicStruct>(),
    ]
    .map(|reference| reference.expect("should register the definition"));

    //* Then
    let names = [
        Struct::schema_name(),
        ContainedStruct::schema_name(),
        AtomicStruct::schema_name(),
    ];
    for (name, reference) in names.iter().zip(&refs) {
        assert!(swagger.definition(name).is_some(), "missing definition {name}");
        assert_eq!(reference.uri(), format!("#/definitions/{name}"));
    }
    assert_eq!(swagger.props.definitions.len(), names.len());
}

#[test]
fn schema_name_prefers_declared_model_name() {
    assert_eq!(
        Struct::schema_name(),
        "io.swagspec.tests.namedmodels.Struct"
    );
    assert_eq!(
        AtomicStruct::schema_name(),
        "io.swagspec.tests.namedmodels.AtomicStruct"
    );
}

#[test]
fn schema_name_without_declared_name_uses_module_path() {
    //* When
    let name = ContainedStruct::schema_name();

    //* Then
    assert_eq!(name, canonical_type_name::<ContainedStruct>());
    assert_eq!(name, "it_canonical_names.namedmodels.ContainedStruct");
}

#[test]
fn registered_definition_encodes_nested_schemas() {
    //* Given
    let mut swagger = Swagger::default();
    swagger
        .add_definition::<Struct>()
        .expect("should register the definition");

    //* When
    let definition = swagger
        .definition("io.swagspec.tests.namedmodels.Struct")
        .map(|schema: &Schema| serde_json::to_string(schema))
        .expect("definition should be registered")
        .expect("should serialize the definition");

    //* Then
    insta::assert_snapshot!(definition, @r#"{"type":"object","required":["Field"],"properties":{"Field":{"type":"object"},"OtherField":{"type":"integer","format":"int64"}}}"#);
}
