//! Seeded fuzz generator for specification object graphs.
//!
//! Generation is bounded by a nesting depth and by the number of elements per
//! collection. Leaf values that need a particular shape (reference URIs, extension
//! keys, path templates, status codes) come from replaceable [`FuzzFuncs`].

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde_json::{Map, Number, Value};
use swagspec_core::{
    ContactInfo, Extensible, Extensions, ExternalDocumentation, Header, Info, Items, License,
    Operation, Parameter, PathItem, Paths, Ref, Response, Responses, Schema, SchemaOrBool,
    SecurityScheme, StringOrArray, Swagger, Tag, XmlObject,
};

/// Seed of the default configuration.
pub const DEFAULT_SEED: u64 = 1646791953;

/// Bounds of the generated graphs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzConfig {
    pub seed: u64,
    /// Nesting levels of objects and collections below the root.
    pub max_depth: usize,
    pub min_elements: usize,
    pub max_elements: usize,
    /// Probability of leaving an optional value unset.
    pub nil_chance: f64,
    /// Probability of turning a refable object into a reference.
    pub ref_chance: f64,
}

impl Default for FuzzConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            max_depth: 10,
            min_elements: 1,
            max_elements: 2,
            nil_chance: 0.01,
            ref_chance: 0.1,
        }
    }
}

impl FuzzConfig {
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn elements(mut self, min: usize, max: usize) -> Self {
        self.min_elements = min;
        self.max_elements = max.max(min);
        self
    }

    pub fn nil_chance(mut self, nil_chance: f64) -> Self {
        self.nil_chance = nil_chance.clamp(0.0, 1.0);
        self
    }

    pub fn ref_chance(mut self, ref_chance: f64) -> Self {
        self.ref_chance = ref_chance.clamp(0.0, 1.0);
        self
    }
}

/// Per-value customization hooks.
#[derive(Debug, Clone, Copy)]
pub struct FuzzFuncs {
    pub ref_uri: fn(&mut Fuzzer) -> String,
    pub extension_key: fn(&mut Fuzzer) -> String,
    pub path_key: fn(&mut Fuzzer) -> String,
    pub text: fn(&mut Fuzzer) -> String,
    pub json_value: fn(&mut Fuzzer) -> Value,
    pub status_code: fn(&mut Fuzzer) -> u16,
}

impl FuzzFuncs {
    /// Hooks producing only values a valid Swagger document can hold.
    pub fn swagger() -> Self {
        Self {
            ref_uri: |f| format!("#/definitions/{}", f.ident(1)),
            extension_key: |f| format!("x-{}", f.ident(0)),
            path_key: |f| format!("/{}", f.ident(0)),
            text: random_text,
            json_value: random_json_value,
            status_code: |f| f.rng().gen_range(100..600),
        }
    }
}

impl Default for FuzzFuncs {
    fn default() -> Self {
        Self::swagger()
    }
}

/// Characters of generated text: plain ASCII plus everything JSON has to escape and a
/// few multi-byte code points.
const TEXT_ALPHABET: &[char] = &[
    'a', 'b', 'c', 'x', 'y', 'z', 'A', 'Z', '0', '7', '9', '-', '_', '.', ' ', '/', '"', '\\',
    '\n', '\t', '\u{1}', '\u{7f}', 'é', 'ß', '€', '😀',
];

const IDENT_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

fn random_text(f: &mut Fuzzer) -> String {
    let len = f.rng().gen_range(0..=8);
    (0..len)
        .map(|_| TEXT_ALPHABET[f.rng().gen_range(0..TEXT_ALPHABET.len())])
        .collect()
}

fn random_json_value(f: &mut Fuzzer) -> Value {
    let choices = if f.can_fill() { 8 } else { 6 };
    match f.rng().gen_range(0..choices) {
        0 => Value::Null,
        1 => Value::Bool(f.rng().gen_bool(0.5)),
        2 => Value::Number(f.rng().gen_range(i64::MIN..=i64::MAX).into()),
        3 => Value::Number(f.rng().gen_range(0..=u64::MAX).into()),
        4 => Number::from_f64(f.finite_f64()).map_or(Value::Null, Value::Number),
        5 => Value::String(f.text()),
        6 => Value::Array(f.elements(|f| (f.funcs.json_value)(f))),
        _ => {
            let mut entries = Map::new();
            for (key, value) in f.elements(|f| (f.text(), (f.funcs.json_value)(f))) {
                entries.insert(key, value);
            }
            Value::Object(entries)
        }
    }
}

/// Random value generator driven by a [`FuzzConfig`].
pub struct Fuzzer {
    rng: StdRng,
    config: FuzzConfig,
    funcs: FuzzFuncs,
    depth: usize,
}

impl Fuzzer {
    pub fn new(config: FuzzConfig) -> Self {
        Self::with_funcs(config, FuzzFuncs::default())
    }

    pub fn with_funcs(config: FuzzConfig, funcs: FuzzFuncs) -> Self {
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            config,
            funcs,
            depth: 0,
        }
    }

    /// Generates a value of type `T`.
    pub fn fuzz<T: Fuzz>(&mut self) -> T {
        T::fuzz(self)
    }

    pub fn config(&self) -> &FuzzConfig {
        &self.config
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Returns `true` while another nesting level fits below the depth bound.
    pub fn can_fill(&self) -> bool {
        self.depth < self.config.max_depth
    }

    /// Runs `fill` one nesting level deeper, or returns `None` at the depth bound.
    pub fn nested<T>(&mut self, fill: impl FnOnce(&mut Self) -> T) -> Option<T> {
        if !self.can_fill() {
            return None;
        }
        self.depth += 1;
        let value = fill(self);
        self.depth -= 1;
        Some(value)
    }

    /// Generates between `min_elements` and `max_elements` values one level deeper,
    /// or none at the depth bound.
    pub fn elements<T>(&mut self, mut item: impl FnMut(&mut Self) -> T) -> Vec<T> {
        self.nested(|f| {
            let count = f
                .rng
                .gen_range(f.config.min_elements..=f.config.max_elements);
            (0..count).map(|_| item(f)).collect()
        })
        .unwrap_or_default()
    }

    /// Returns `true` with probability `nil_chance`.
    pub fn nil(&mut self) -> bool {
        let chance = self.config.nil_chance;
        self.rng.gen_bool(chance)
    }

    /// Returns `true` with probability `ref_chance`.
    pub fn make_ref(&mut self) -> bool {
        let chance = self.config.ref_chance;
        self.rng.gen_bool(chance)
    }

    pub fn text(&mut self) -> String {
        (self.funcs.text)(self)
    }

    /// A lowercase alphanumeric identifier of at least `min_len` characters.
    pub fn ident(&mut self, min_len: usize) -> String {
        let len = self.rng.gen_range(min_len..=min_len + 6);
        (0..len)
            .map(|_| char::from(IDENT_ALPHABET[self.rng.gen_range(0..IDENT_ALPHABET.len())]))
            .collect()
    }

    /// Runs `count` fills drawn at random from `fills` on `target`.
    pub fn fill_some<T>(&mut self, target: &mut T, fills: &[fn(&mut T, &mut Self)], count: usize) {
        if fills.is_empty() {
            return;
        }
        for _ in 0..count {
            let fill = fills[self.rng.gen_range(0..fills.len())];
            fill(target, self);
        }
    }

    /// A finite float spread over the whole exponent range.
    pub fn finite_f64(&mut self) -> f64 {
        loop {
            let candidate = f64::from_bits(self.rng.gen_range(0..=u64::MAX));
            if candidate.is_finite() {
                return candidate;
            }
        }
    }
}

/// Types the fuzzer can generate.
pub trait Fuzz: Sized {
    fn fuzz(f: &mut Fuzzer) -> Self;
}

impl Fuzz for String {
    fn fuzz(f: &mut Fuzzer) -> Self {
        f.text()
    }
}

impl Fuzz for bool {
    fn fuzz(f: &mut Fuzzer) -> Self {
        f.rng().gen_bool(0.5)
    }
}

impl Fuzz for i64 {
    fn fuzz(f: &mut Fuzzer) -> Self {
        f.rng().gen_range(i64::MIN..=i64::MAX)
    }
}

impl Fuzz for f64 {
    fn fuzz(f: &mut Fuzzer) -> Self {
        f.finite_f64()
    }
}

impl Fuzz for Value {
    fn fuzz(f: &mut Fuzzer) -> Self {
        (f.funcs.json_value)(f)
    }
}

impl<T: Fuzz> Fuzz for Option<T> {
    fn fuzz(f: &mut Fuzzer) -> Self {
        if f.nil() {
            return None;
        }
        f.nested(T::fuzz)
    }
}

impl<T: Fuzz> Fuzz for Box<T> {
    fn fuzz(f: &mut Fuzzer) -> Self {
        Box::new(T::fuzz(f))
    }
}

impl<T: Fuzz> Fuzz for Vec<T> {
    fn fuzz(f: &mut Fuzzer) -> Self {
        f.elements(T::fuzz)
    }
}

impl<T: Fuzz> Fuzz for BTreeMap<String, T> {
    fn fuzz(f: &mut Fuzzer) -> Self {
        f.elements(|f| (f.text(), T::fuzz(f))).into_iter().collect()
    }
}

impl Fuzz for StringOrArray {
    fn fuzz(f: &mut Fuzzer) -> Self {
        // Zero, one and two elements encode differently
        let len = f.rng().gen_range(0..=2);
        StringOrArray((0..len).map(|_| f.text()).collect())
    }
}

impl Fuzz for SchemaOrBool {
    fn fuzz(f: &mut Fuzzer) -> Self {
        if f.rng().gen_bool(0.5) {
            SchemaOrBool::Allows(f.rng().gen_bool(0.5))
        } else {
            SchemaOrBool::Schema(Box::fuzz(f))
        }
    }
}

impl Fuzz for Ref {
    fn fuzz(f: &mut Fuzzer) -> Self {
        let uri = (f.funcs.ref_uri)(f);
        Ref::new(uri).expect("ref_uri hooks should produce non-empty URIs")
    }
}

impl Fuzz for Extensions {
    fn fuzz(f: &mut Fuzzer) -> Self {
        let entries = f.elements(|f| ((f.funcs.extension_key)(f), (f.funcs.json_value)(f)));
        let mut extensions = Extensions::new();
        for (key, value) in entries {
            if let Err(err) = extensions.insert(key, value) {
                tracing::debug!(error = %err, "skipping fuzzed extension");
            }
        }
        extensions
    }
}

impl Fuzz for Paths {
    fn fuzz(f: &mut Fuzzer) -> Self {
        let mut paths = Paths::new();
        paths.extensions = Extensions::fuzz(f);
        for (key, item) in f.elements(|f| ((f.funcs.path_key)(f), PathItem::fuzz(f))) {
            paths.paths.insert(key, item);
        }
        paths
    }
}

impl Fuzz for Responses {
    fn fuzz(f: &mut Fuzzer) -> Self {
        let mut responses = Responses::new();
        responses.extensions = Extensions::fuzz(f);
        responses.default = Option::fuzz(f);
        for (code, response) in f.elements(|f| ((f.funcs.status_code)(f), Response::fuzz(f))) {
            responses.status_codes.insert(code, response);
        }
        responses
    }
}

/// Generates an extensible object field by field; refable kinds sometimes become a
/// reference holding only extensions.
///
/// Fields listed after `pick N of` are costly subtrees; only `N` random draws among
/// them are filled per object, which keeps deeply recursive kinds tractable.
macro_rules! fuzz_object {
    (
        $name:ident { $( $field:ident ),* $(,)? }
        $( pick $count:literal of { $( $sparse:ident ),* $(,)? } )?
    ) => {
        impl Fuzz for $name {
            fn fuzz(f: &mut Fuzzer) -> Self {
                f.nested(|f| {
                    let mut object = $name::default();
                    *object.extensions_mut() = Extensions::fuzz(f);
                    $( object.props.$field = Fuzz::fuzz(f); )*
                    $(
                        let fills: &[fn(&mut <$name as Extensible>::Props, &mut Fuzzer)] =
                            &[ $( |props, f| props.$sparse = Fuzz::fuzz(f) ),* ];
                        f.fill_some(&mut object.props, fills, $count);
                    )?
                    object
                })
                .unwrap_or_default()
            }
        }
    };
    (
        $name:ident: Refable { $( $field:ident ),* $(,)? }
        $( pick $count:literal of { $( $sparse:ident ),* $(,)? } )?
    ) => {
        impl Fuzz for $name {
            fn fuzz(f: &mut Fuzzer) -> Self {
                f.nested(|f| {
                    let mut object = $name::default();
                    *object.extensions_mut() = Extensions::fuzz(f);
                    if f.make_ref() {
                        object.reference = Some(Ref::fuzz(f));
                        return object;
                    }
                    $( object.props.$field = Fuzz::fuzz(f); )*
                    $(
                        let fills: &[fn(&mut <$name as Extensible>::Props, &mut Fuzzer)] =
                            &[ $( |props, f| props.$sparse = Fuzz::fuzz(f) ),* ];
                        f.fill_some(&mut object.props, fills, $count);
                    )?
                    object
                })
                .unwrap_or_default()
            }
        }
    };
}

fuzz_object!(Swagger {
    id,
    consumes,
    produces,
    schemes,
    swagger,
    info,
    host,
    base_path,
    paths,
    definitions,
    parameters,
    responses,
    security_definitions,
    security,
    tags,
    external_docs,
});
fuzz_object!(Info {
    description,
    title,
    terms_of_service,
    contact,
    license,
    version,
});
fuzz_object!(ContactInfo { name, url, email });
fuzz_object!(License { name, url });
fuzz_object!(ExternalDocumentation { description, url });
fuzz_object!(Tag {
    name,
    description,
    external_docs,
});
fuzz_object!(SecurityScheme {
    type_name,
    location,
    name,
    description,
    flow,
    authorization_url,
    token_url,
    scopes,
});
fuzz_object!(Operation {
    description,
    consumes,
    produces,
    schemes,
    tags,
    summary,
    external_docs,
    id,
    deprecated,
    security,
    parameters,
    responses,
});
fuzz_object!(PathItem: Refable {
    get,
    put,
    post,
    delete,
    options,
    head,
    patch,
    parameters,
});
fuzz_object!(Parameter: Refable {
    description,
    name,
    location,
    required,
    schema,
    allow_empty_value,
    type_name,
    format,
    items,
    collection_format,
    default,
    maximum,
    exclusive_maximum,
    minimum,
    exclusive_minimum,
    max_length,
    min_length,
    pattern,
    max_items,
    min_items,
    unique_items,
    enum_values,
    multiple_of,
    example,
});
fuzz_object!(Items {
    type_name,
    format,
    items,
    collection_format,
    default,
    maximum,
    exclusive_maximum,
    minimum,
    exclusive_minimum,
    max_length,
    min_length,
    pattern,
    max_items,
    min_items,
    unique_items,
    enum_values,
    multiple_of,
    example,
});
fuzz_object!(Header {
    description,
    type_name,
    format,
    items,
    collection_format,
    default,
    maximum,
    exclusive_maximum,
    minimum,
    exclusive_minimum,
    max_length,
    min_length,
    pattern,
    max_items,
    min_items,
    unique_items,
    enum_values,
    multiple_of,
    example,
});
fuzz_object!(Response: Refable {
    description,
    schema,
    headers,
    examples,
});
fuzz_object!(XmlObject {
    name,
    namespace,
    prefix,
    attribute,
    wrapped,
});
fuzz_object!(Schema: Refable {
    id,
    schema_uri,
    description,
    type_name,
    format,
    title,
    default,
    maximum,
    exclusive_maximum,
    minimum,
    exclusive_minimum,
    max_length,
    min_length,
    pattern,
    max_items,
    min_items,
    unique_items,
    multiple_of,
    enum_values,
    max_properties,
    min_properties,
    required,
    discriminator,
    read_only,
    xml,
    external_docs,
    example,
} pick 2 of {
    items,
    all_of,
    one_of,
    any_of,
    not,
    properties,
    additional_properties,
    pattern_properties,
    additional_items,
    definitions,
});
