//! Rewrites of encoded documents into non-canonical JSON.
//!
//! Layout rewrites keep the decoded value: members are shuffled, whitespace is
//! inserted and characters of keys and strings are escaped. Perturbations change it:
//! a `$ref` is added to a random object next to the members it shadows, or a member
//! is set to `null`.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use serde_json::Value;
use swagspec_core::spec::REF_KEY;

const WHITESPACE: &[&str] = &[" ", "  ", "\n", "\t", "\r\n"];

/// Reference added by [`Perturbation::ShadowingRef`].
pub const SHADOWING_REF_URI: &str = "#/definitions/Shadowing";

/// A value-changing rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perturbation {
    /// A `$ref` member was added to an object.
    ShadowingRef,
    /// A member value was replaced with `null`.
    NullMember,
}

/// Seeded source of rewrites.
pub struct Mutator {
    rng: StdRng,
    whitespace_chance: f64,
    escape_chance: f64,
}

impl Mutator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            whitespace_chance: 0.2,
            escape_chance: 0.05,
        }
    }

    /// Writes `value` with shuffled object members, random whitespace and randomly
    /// escaped characters.
    pub fn relayout(&mut self, value: &Value) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_value(&mut out, value);
        out
    }

    /// Applies one random perturbation to an object inside `value`.
    ///
    /// Returns `None` if `value` holds no object.
    pub fn perturb(&mut self, value: &mut Value) -> Option<Perturbation> {
        let mut pointers = Vec::new();
        collect_objects(value, String::new(), &mut pointers);
        let pointer = pointers.choose(&mut self.rng)?.clone();
        let object = value.pointer_mut(&pointer)?.as_object_mut()?;

        let keys = object.keys().cloned().collect::<Vec<_>>();
        match keys.choose(&mut self.rng) {
            Some(key) if self.rng.gen_bool(0.5) => {
                object.insert(key.clone(), Value::Null);
                Some(Perturbation::NullMember)
            }
            _ => {
                object.insert(REF_KEY.to_owned(), Value::from(SHADOWING_REF_URI));
                Some(Perturbation::ShadowingRef)
            }
        }
    }

    fn write_value(&mut self, out: &mut Vec<u8>, value: &Value) {
        self.whitespace(out);
        match value {
            Value::Null => out.extend_from_slice(b"null"),
            Value::Bool(b) => out.extend_from_slice(if *b { "true" } else { "false" }.as_bytes()),
            Value::Number(n) => out.extend_from_slice(n.to_string().as_bytes()),
            Value::String(s) => self.write_string(out, s),
            Value::Array(items) => {
                out.push(b'[');
                for (idx, item) in items.iter().enumerate() {
                    if idx > 0 {
                        out.push(b',');
                    }
                    self.write_value(out, item);
                }
                self.whitespace(out);
                out.push(b']');
            }
            Value::Object(entries) => {
                let mut members = entries.iter().collect::<Vec<_>>();
                members.shuffle(&mut self.rng);
                out.push(b'{');
                for (idx, (key, item)) in members.into_iter().enumerate() {
                    if idx > 0 {
                        out.push(b',');
                    }
                    self.whitespace(out);
                    self.write_string(out, key);
                    self.whitespace(out);
                    out.push(b':');
                    self.write_value(out, item);
                }
                self.whitespace(out);
                out.push(b'}');
            }
        }
        self.whitespace(out);
    }

    fn write_string(&mut self, out: &mut Vec<u8>, s: &str) {
        out.push(b'"');
        for ch in s.chars() {
            let escape = self.rng.gen_bool(self.escape_chance);
            match ch {
                '"' => out.extend_from_slice(br#"\""#),
                '\\' => out.extend_from_slice(br"\\"),
                '/' if escape => out.extend_from_slice(br"\/"),
                ch if u32::from(ch) < 0x20 || escape => push_unicode_escape(out, ch),
                ch => out.extend_from_slice(ch.encode_utf8(&mut [0; 4]).as_bytes()),
            }
        }
        out.push(b'"');
    }

    fn whitespace(&mut self, out: &mut Vec<u8>) {
        if self.rng.gen_bool(self.whitespace_chance) {
            let ws = WHITESPACE[self.rng.gen_range(0..WHITESPACE.len())];
            out.extend_from_slice(ws.as_bytes());
        }
    }
}

/// Writes `ch` as `\uXXXX`, as a surrogate pair outside the basic plane.
fn push_unicode_escape(out: &mut Vec<u8>, ch: char) {
    for unit in ch.encode_utf16(&mut [0; 2]) {
        out.extend_from_slice(format!("\\u{unit:04x}").as_bytes());
    }
}

/// Collects JSON pointers to every object in `value`, innermost first.
fn collect_objects(value: &Value, pointer: String, pointers: &mut Vec<String>) {
    match value {
        Value::Object(entries) => {
            for (key, item) in entries {
                let token = key.replace('~', "~0").replace('/', "~1");
                collect_objects(item, format!("{pointer}/{token}"), pointers);
            }
            pointers.push(pointer);
        }
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                collect_objects(item, format!("{pointer}/{idx}"), pointers);
            }
        }
        _ => {}
    }
}
