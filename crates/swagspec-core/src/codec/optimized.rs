//! Optimized decode path.
//!
//! A hand-written, pull-style token reader walks the input bytes once and each type
//! reads itself straight from the stream, without building an intermediate value
//! tree. The reader performs the same checks as the general path (well-formed JSON,
//! unique keys, nesting depth) so that both paths accept and reject the same inputs.
//!
//! Every object is read in a single pass, with no lookahead for `$ref`.

use std::{
    borrow::Cow,
    collections::{BTreeMap, HashSet},
};

use serde_json::{Map, Number, Value};

use crate::{
    error::{Error, Result},
    object::{Extensible, KeyClass, PropertyGroup as _, classify_key},
    spec::{REF_KEY, Ref},
};

/// Decoding straight from the token stream.
pub trait ReadJson: Sized {
    fn read_json(reader: &mut Reader<'_>) -> Result<Self>;
}

/// Decodes `input` into `T` through the optimized path.
pub fn decode<T: ReadJson>(input: &[u8], max_depth: usize) -> Result<T> {
    let mut reader = Reader::new(input, max_depth);
    let value = T::read_json(&mut reader)?;
    reader.finish()?;
    Ok(value)
}

/// Kind of the next JSON value in the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl Kind {
    /// JSON type name, as reported in type mismatch errors.
    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "boolean",
            Kind::Number => "number",
            Kind::String => "string",
            Kind::Array => "array",
            Kind::Object => "object",
        }
    }
}

/// Pull reader over a JSON byte slice.
///
/// Containers are consumed with `begin_object`/`next_key` and
/// `begin_array`/`next_element`; scalars with the `read_*` methods.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    input: &'a [u8],
    pos: usize,
    depth: usize,
    max_depth: usize,
    /// Set right after a container was opened, before its first member.
    fresh: bool,
}

impl<'a> Reader<'a> {
    pub fn new(input: &'a [u8], max_depth: usize) -> Self {
        Self {
            input,
            pos: 0,
            depth: 0,
            max_depth,
            fresh: false,
        }
    }

    /// Byte offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Checks that nothing but whitespace follows the decoded value.
    pub fn finish(&mut self) -> Result<()> {
        match self.peek_byte() {
            None => Ok(()),
            Some(_) => Err(self.syntax("trailing characters")),
        }
    }

    /// Looks at the next value without consuming it.
    pub fn peek_kind(&mut self) -> Result<Kind> {
        match self.peek_byte() {
            Some(b'n') => Ok(Kind::Null),
            Some(b't' | b'f') => Ok(Kind::Bool),
            Some(b'"') => Ok(Kind::String),
            Some(b'[') => Ok(Kind::Array),
            Some(b'{') => Ok(Kind::Object),
            Some(b'-' | b'0'..=b'9') => Ok(Kind::Number),
            Some(_) => Err(self.syntax("expected value")),
            None => Err(self.syntax("unexpected end of input")),
        }
    }

    /// Fails with a type mismatch unless the next value is of kind `kind`.
    pub fn expect_kind(&mut self, kind: Kind, expected: &'static str) -> Result<()> {
        let found = self.peek_kind()?;
        if found != kind {
            return Err(Error::type_mismatch(expected, found.name()));
        }
        Ok(())
    }

    pub fn read_null(&mut self) -> Result<()> {
        self.skip_ws();
        self.literal(b"null")
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        match self.peek_byte() {
            Some(b't') => self.literal(b"true").map(|()| true),
            Some(b'f') => self.literal(b"false").map(|()| false),
            _ => Err(self.syntax("expected boolean")),
        }
    }

    /// Reads a number token.
    ///
    /// The token is validated against the JSON grammar here. Integers that fit 64 bits
    /// are converted in place, floats with the correctly rounded standard parser, and
    /// the remaining integer tokens by `serde_json`, so both decode paths produce
    /// identical numbers.
    pub fn read_number(&mut self) -> Result<Number> {
        self.skip_ws();
        let start = self.pos;
        let negative = self.eat(b'-');
        let digits_start = self.pos;
        match self.bump() {
            Some(b'0') => {}
            Some(b'1'..=b'9') => self.eat_digits(),
            _ => return Err(self.syntax("invalid number")),
        }
        let digits_end = self.pos;
        let mut integral = true;
        if self.eat(b'.') {
            integral = false;
            self.require_digits()?;
        }
        if self.eat(b'e') || self.eat(b'E') {
            integral = false;
            if !self.eat(b'+') {
                self.eat(b'-');
            }
            self.require_digits()?;
        }

        if integral {
            if let Some(number) = small_integer(&self.input[digits_start..digits_end], negative) {
                return Ok(number);
            }
        }
        let token = std::str::from_utf8(&self.input[start..self.pos])
            .map_err(|_| self.syntax("invalid number"))?;
        if integral {
            // Beyond 64 bits, or negative zero
            return token.parse::<Number>().map_err(Error::syntax);
        }
        token
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .ok_or_else(|| self.syntax("number out of range"))
    }

    /// Reads a string token, unescaping it if needed.
    pub fn read_string(&mut self) -> Result<Cow<'a, str>> {
        self.skip_ws();
        if self.bump() != Some(b'"') {
            return Err(self.syntax("expected string"));
        }

        let input = self.input;
        let start = self.pos;
        loop {
            match self.bump() {
                Some(b'"') => return self.utf8(&input[start..self.pos - 1]).map(Cow::Borrowed),
                Some(b'\\') => break,
                Some(0x00..=0x1f) => return Err(self.syntax("control character in string")),
                Some(_) => {}
                None => return Err(self.syntax("unterminated string")),
            }
        }

        // Slow path: at least one escape sequence.
        let mut buf = input[start..self.pos - 1].to_vec();
        self.unescape(&mut buf)?;
        loop {
            match self.bump() {
                Some(b'"') => break,
                Some(b'\\') => self.unescape(&mut buf)?,
                Some(0x00..=0x1f) => return Err(self.syntax("control character in string")),
                Some(byte) => buf.push(byte),
                None => return Err(self.syntax("unterminated string")),
            }
        }
        String::from_utf8(buf)
            .map(Cow::Owned)
            .map_err(|_| self.syntax("invalid UTF-8 in string"))
    }

    /// Consumes `{`.
    pub fn begin_object(&mut self) -> Result<()> {
        self.skip_ws();
        if self.bump() != Some(b'{') {
            return Err(self.syntax("expected object"));
        }
        self.enter()
    }

    /// Advances to the next member of the current object and returns its key, or
    /// `None` once the closing `}` was consumed.
    pub fn next_key(&mut self) -> Result<Option<Cow<'a, str>>> {
        if !self.next_member(b'}')? {
            return Ok(None);
        }
        let key = match self.peek_byte() {
            Some(b'"') => self.read_string()?,
            _ => return Err(self.syntax("expected object key")),
        };
        self.skip_ws();
        if self.bump() != Some(b':') {
            return Err(self.syntax("expected `:`"));
        }
        Ok(Some(key))
    }

    /// Consumes `[`.
    pub fn begin_array(&mut self) -> Result<()> {
        self.skip_ws();
        if self.bump() != Some(b'[') {
            return Err(self.syntax("expected array"));
        }
        self.enter()
    }

    /// Returns `true` if another element follows in the current array, `false` once
    /// the closing `]` was consumed.
    pub fn next_element(&mut self) -> Result<bool> {
        self.next_member(b']')
    }

    /// Reads any JSON value into a [`Value`].
    pub fn read_value(&mut self) -> Result<Value> {
        match self.peek_kind()? {
            Kind::Null => self.read_null().map(|()| Value::Null),
            Kind::Bool => self.read_bool().map(Value::Bool),
            Kind::Number => self.read_number().map(Value::Number),
            Kind::String => self.read_string().map(|s| Value::String(s.into_owned())),
            Kind::Array => {
                self.begin_array()?;
                let mut items = Vec::new();
                while self.next_element()? {
                    items.push(self.read_value()?);
                }
                Ok(Value::Array(items))
            }
            Kind::Object => {
                self.begin_object()?;
                let mut entries = Map::new();
                while let Some(key) = self.next_key()? {
                    if entries.contains_key(key.as_ref()) {
                        return Err(Error::DuplicateKey {
                            key: key.into_owned(),
                        });
                    }
                    let value = self.read_value()?;
                    entries.insert(key.into_owned(), value);
                }
                Ok(Value::Object(entries))
            }
        }
    }

    /// Validates and discards the next value.
    pub fn skip_value(&mut self) -> Result<()> {
        match self.peek_kind()? {
            Kind::Null => self.read_null(),
            Kind::Bool => self.read_bool().map(drop),
            Kind::Number => self.read_number().map(drop),
            Kind::String => self.read_string().map(drop),
            Kind::Array => {
                self.begin_array()?;
                while self.next_element()? {
                    self.skip_value()?;
                }
                Ok(())
            }
            Kind::Object => {
                self.begin_object()?;
                let mut seen = HashSet::new();
                while let Some(key) = self.next_key()? {
                    if !seen.insert(key.clone()) {
                        return Err(Error::DuplicateKey {
                            key: key.into_owned(),
                        });
                    }
                    self.skip_value()?;
                }
                Ok(())
            }
        }
    }

    fn next_member(&mut self, close: u8) -> Result<bool> {
        self.skip_ws();
        if self.fresh {
            self.fresh = false;
            if self.peek_byte() == Some(close) {
                self.pos += 1;
                self.depth -= 1;
                return Ok(false);
            }
            return Ok(true);
        }
        match self.bump() {
            Some(b',') => Ok(true),
            Some(byte) if byte == close => {
                self.depth -= 1;
                Ok(false)
            }
            _ => Err(self.syntax("expected `,` or closing bracket")),
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(Error::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        self.fresh = true;
        Ok(())
    }

    fn unescape(&mut self, buf: &mut Vec<u8>) -> Result<()> {
        let byte = match self.bump() {
            Some(b'"') => b'"',
            Some(b'\\') => b'\\',
            Some(b'/') => b'/',
            Some(b'b') => 0x08,
            Some(b'f') => 0x0c,
            Some(b'n') => b'\n',
            Some(b'r') => b'\r',
            Some(b't') => b'\t',
            Some(b'u') => {
                let ch = self.unicode_escape()?;
                buf.extend_from_slice(ch.encode_utf8(&mut [0; 4]).as_bytes());
                return Ok(());
            }
            _ => return Err(self.syntax("invalid escape")),
        };
        buf.push(byte);
        Ok(())
    }

    fn unicode_escape(&mut self) -> Result<char> {
        let first = self.hex4()?;
        let code = match first {
            0xd800..=0xdbff => {
                if self.bump() != Some(b'\\') || self.bump() != Some(b'u') {
                    return Err(self.syntax("lone leading surrogate in hex escape"));
                }
                let second = self.hex4()?;
                if !(0xdc00..=0xdfff).contains(&second) {
                    return Err(self.syntax("lone leading surrogate in hex escape"));
                }
                0x10000 + ((first - 0xd800) << 10) + (second - 0xdc00)
            }
            0xdc00..=0xdfff => return Err(self.syntax("lone trailing surrogate in hex escape")),
            code => code,
        };
        char::from_u32(code).ok_or_else(|| self.syntax("invalid unicode escape"))
    }

    fn hex4(&mut self) -> Result<u32> {
        let mut code = 0;
        for _ in 0..4 {
            let digit = match self.bump() {
                Some(byte @ b'0'..=b'9') => byte - b'0',
                Some(byte @ b'a'..=b'f') => byte - b'a' + 10,
                Some(byte @ b'A'..=b'F') => byte - b'A' + 10,
                _ => return Err(self.syntax("invalid hex escape")),
            };
            code = (code << 4) | u32::from(digit);
        }
        Ok(code)
    }

    fn literal(&mut self, word: &[u8]) -> Result<()> {
        if self.input[self.pos..].starts_with(word) {
            self.pos += word.len();
            Ok(())
        } else {
            Err(self.syntax("invalid literal"))
        }
    }

    fn utf8(&self, bytes: &'a [u8]) -> Result<&'a str> {
        std::str::from_utf8(bytes).map_err(|_| self.syntax("invalid UTF-8 in string"))
    }

    fn skip_ws(&mut self) {
        while let Some(b' ' | b'\t' | b'\n' | b'\r') = self.input.get(self.pos) {
            self.pos += 1;
        }
    }

    fn peek_byte(&mut self) -> Option<u8> {
        self.skip_ws();
        self.input.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.input.get(self.pos).copied()?;
        self.pos += 1;
        Some(byte)
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.input.get(self.pos) == Some(&byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_digits(&mut self) {
        while let Some(b'0'..=b'9') = self.input.get(self.pos) {
            self.pos += 1;
        }
    }

    fn require_digits(&mut self) -> Result<()> {
        match self.input.get(self.pos) {
            Some(b'0'..=b'9') => {
                self.eat_digits();
                Ok(())
            }
            _ => Err(self.syntax("invalid number")),
        }
    }

    fn syntax(&self, message: &str) -> Error {
        Error::syntax(format_args!("{message} at byte {}", self.pos))
    }
}

/// Converts the digits of an integer token that fits an `i64` or a `u64`.
///
/// Returns `None` for negative zero, which `serde_json` reads as a float, and for
/// integers beyond 64 bits.
fn small_integer(digits: &[u8], negative: bool) -> Option<Number> {
    let mut magnitude: u64 = 0;
    for digit in digits {
        magnitude = magnitude
            .checked_mul(10)?
            .checked_add(u64::from(digit - b'0'))?;
    }
    if !negative {
        return Some(magnitude.into());
    }
    if magnitude == 0 {
        return None;
    }
    let below = i64::try_from(magnitude - 1).ok()?;
    Some((-below - 1).into())
}

/// Capacity of the set of declared fields seen while reading one object.
pub(crate) const FIELD_SET_CAPACITY: usize = u128::BITS as usize;

/// Reads a JSON object into an extensible object of kind `T`.
///
/// The object is read in one pass. On refable kinds a `$ref` may come after the
/// declared fields it shadows, so their decode errors are held back until the end of
/// the object and dropped once a reference turned up. Faults of the JSON text itself
/// are reported at once.
pub(crate) fn read_object<T: Extensible>(reader: &mut Reader<'_>) -> Result<T> {
    let kind = reader.peek_kind()?;
    if kind != Kind::Object {
        return Err(Error::not_an_object(kind.name()));
    }

    let mut object = T::default();
    let mut seen_fields = 0u128;
    let mut unknown_keys = Vec::new();
    let mut has_reference = false;
    let mut held_back = None;
    reader.begin_object()?;
    while let Some(key) = reader.next_key()? {
        match classify_key::<T>(&key) {
            KeyClass::Known(idx) => {
                let bit = 1u128 << idx;
                if seen_fields & bit != 0 {
                    return Err(duplicate_key(key));
                }
                seen_fields |= bit;
                if has_reference {
                    reader.skip_value()?;
                } else if T::REFABLE {
                    let start = reader.clone();
                    if let Err(err) = object.props_mut().read_field(&key, reader) {
                        hold_back(reader, start, err, &mut held_back)?;
                    }
                } else {
                    object.props_mut().read_field(&key, reader)?;
                }
            }
            KeyClass::Reference => {
                if has_reference {
                    return Err(duplicate_key(key));
                }
                let reference = read_reference(reader).map_err(|err| err.within(REF_KEY))?;
                if let Some(slot) = object.reference_slot() {
                    *slot = Some(reference);
                }
                has_reference = true;
            }
            KeyClass::Extension => {
                if object.extensions().contains_key(&key) {
                    return Err(duplicate_key(key));
                }
                let value = reader.read_value()?;
                object
                    .extensions_mut()
                    .insert_decoded(key.into_owned(), value);
            }
            KeyClass::Unknown => {
                if unknown_keys.contains(&key) {
                    return Err(duplicate_key(key));
                }
                if !T::REFABLE {
                    return Err(Error::invalid_extension_key(key));
                }
                reader.skip_value()?;
                if !has_reference && held_back.is_none() {
                    held_back = Some(Error::invalid_extension_key(key.as_ref()));
                }
                unknown_keys.push(key);
            }
        }
    }

    if has_reference {
        *object.props_mut() = Default::default();
        return Ok(object);
    }
    match held_back {
        Some(err) => Err(err),
        None => Ok(object),
    }
}

/// Rewinds to `start` and skips the value a field failed to decode from, keeping the
/// first such error. Structural errors are returned instead.
fn hold_back<'a>(
    reader: &mut Reader<'a>,
    start: Reader<'a>,
    err: Error,
    held_back: &mut Option<Error>,
) -> Result<()> {
    if err.is_structural() {
        return Err(err);
    }
    *reader = start;
    reader.skip_value()?;
    held_back.get_or_insert(err);
    Ok(())
}

fn duplicate_key(key: Cow<'_, str>) -> Error {
    Error::DuplicateKey {
        key: key.into_owned(),
    }
}

fn read_reference(reader: &mut Reader<'_>) -> Result<Ref> {
    Ref::new(String::read_json(reader)?)
}

impl ReadJson for Value {
    fn read_json(reader: &mut Reader<'_>) -> Result<Self> {
        reader.read_value()
    }
}

impl ReadJson for String {
    fn read_json(reader: &mut Reader<'_>) -> Result<Self> {
        reader.expect_kind(Kind::String, "string")?;
        reader.read_string().map(Cow::into_owned)
    }
}

impl ReadJson for bool {
    fn read_json(reader: &mut Reader<'_>) -> Result<Self> {
        reader.expect_kind(Kind::Bool, "boolean")?;
        reader.read_bool()
    }
}

impl ReadJson for f64 {
    fn read_json(reader: &mut Reader<'_>) -> Result<Self> {
        reader.expect_kind(Kind::Number, "number")?;
        reader
            .read_number()?
            .as_f64()
            .ok_or_else(|| Error::type_mismatch("number", "number"))
    }
}

impl ReadJson for i64 {
    fn read_json(reader: &mut Reader<'_>) -> Result<Self> {
        reader.expect_kind(Kind::Number, "integer")?;
        reader
            .read_number()?
            .as_i64()
            .ok_or_else(|| Error::type_mismatch("integer", "number"))
    }
}

impl<T: ReadJson> ReadJson for Option<T> {
    fn read_json(reader: &mut Reader<'_>) -> Result<Self> {
        if reader.peek_kind()? == Kind::Null {
            reader.read_null()?;
            return Ok(None);
        }
        T::read_json(reader).map(Some)
    }
}

impl<T: ReadJson> ReadJson for Box<T> {
    fn read_json(reader: &mut Reader<'_>) -> Result<Self> {
        T::read_json(reader).map(Box::new)
    }
}

impl<T: ReadJson> ReadJson for Vec<T> {
    fn read_json(reader: &mut Reader<'_>) -> Result<Self> {
        reader.expect_kind(Kind::Array, "array")?;
        reader.begin_array()?;
        let mut items = Vec::new();
        while reader.next_element()? {
            let item = T::read_json(reader).map_err(|err| err.within(items.len()))?;
            items.push(item);
        }
        Ok(items)
    }
}

impl<T: ReadJson> ReadJson for BTreeMap<String, T> {
    fn read_json(reader: &mut Reader<'_>) -> Result<Self> {
        reader.expect_kind(Kind::Object, "object")?;
        reader.begin_object()?;
        let mut entries = BTreeMap::new();
        while let Some(key) = reader.next_key()? {
            if entries.contains_key(key.as_ref()) {
                return Err(Error::DuplicateKey {
                    key: key.into_owned(),
                });
            }
            let item = T::read_json(reader).map_err(|err| err.within(&key))?;
            entries.insert(key.into_owned(), item);
        }
        Ok(entries)
    }
}
