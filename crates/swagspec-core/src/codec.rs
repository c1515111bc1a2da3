//! JSON codec for specification documents.
//!
//! Encoding always produces the canonical form: declared fields in declaration order,
//! then extensions sorted by key. Decoding has two interchangeable implementations,
//! selected per call through [`DecodeOptions`]:
//!
//! - [`DecodeStrategy::General`] parses the input with `serde_json` into a value tree
//!   and walks it generically using each type's declared field metadata.
//! - [`DecodeStrategy::Optimized`] streams the input through a hand-written token
//!   reader into per-type decode code.
//!
//! Both accept the same inputs, produce equal values and reject the same inputs.

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::error::{Error, Result};

pub(crate) mod encode;
pub mod general;
pub mod optimized;

/// Default bound on nested objects and arrays.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Largest accepted depth bound; larger values are clamped.
///
/// Kept below `serde_json`'s own recursion limit so that only the configured bound
/// can trip on either path.
pub const MAX_DEPTH_CEILING: usize = 100;

/// Which decoder implementation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeStrategy {
    /// Value-tree parse followed by a generic, metadata-driven walk.
    #[default]
    General,
    /// Streaming token reader with per-type decode code.
    Optimized,
}

impl DecodeStrategy {
    /// Both strategies, general first.
    pub const ALL: [DecodeStrategy; 2] = [DecodeStrategy::General, DecodeStrategy::Optimized];

    pub fn as_str(self) -> &'static str {
        match self {
            DecodeStrategy::General => "general",
            DecodeStrategy::Optimized => "optimized",
        }
    }
}

impl fmt::Display for DecodeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DecodeStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(DecodeStrategy::General),
            "optimized" => Ok(DecodeStrategy::Optimized),
            other => Err(UnknownStrategy(other.to_owned())),
        }
    }
}

/// Returned when parsing an unknown decode strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown decode strategy `{0}`, expected `general` or `optimized`")]
pub struct UnknownStrategy(pub String);

/// Per-call decoder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DecodeOptions {
    /// Decoder implementation to run.
    pub strategy: DecodeStrategy,
    /// Maximum number of nested objects and arrays, the root included.
    pub max_depth: usize,
}

impl DecodeOptions {
    /// Creates options with the general strategy and the default depth bound.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the decoder implementation.
    pub fn strategy(mut self, strategy: DecodeStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the depth bound, clamped to [`MAX_DEPTH_CEILING`].
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.min(MAX_DEPTH_CEILING);
        self
    }

    fn effective_max_depth(&self) -> usize {
        self.max_depth.min(MAX_DEPTH_CEILING)
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            strategy: DecodeStrategy::General,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Types both decoders can produce.
pub trait Decode: general::FromJson + optimized::ReadJson {}

impl<T: general::FromJson + optimized::ReadJson> Decode for T {}

/// Decodes `input` with the decoder selected in `options`.
pub fn decode<T: Decode>(input: &[u8], options: DecodeOptions) -> Result<T> {
    let max_depth = options.effective_max_depth();
    tracing::debug!(
        strategy = %options.strategy,
        max_depth,
        len = input.len(),
        target = std::any::type_name::<T>(),
        "decoding document"
    );
    let decoded = match options.strategy {
        DecodeStrategy::General => general::decode(input, max_depth),
        DecodeStrategy::Optimized => optimized::decode(input, max_depth),
    };
    if let Err(err) = &decoded {
        tracing::debug!(strategy = %options.strategy, error = %err, "decoding failed");
    }
    decoded
}

/// Decodes a JSON string with the decoder selected in `options`.
pub fn decode_str<T: Decode>(input: &str, options: DecodeOptions) -> Result<T> {
    decode(input.as_bytes(), options)
}

/// Encodes `value` in canonical form.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    let bytes = serde_json::to_vec(value).map_err(Error::Encode)?;
    tracing::debug!(len = bytes.len(), "encoded document");
    Ok(bytes)
}

/// Encodes `value` in canonical form as a string.
pub fn encode_to_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value).map_err(Error::Encode)?;
    tracing::debug!(len = json.len(), "encoded document");
    Ok(json)
}

/// Encodes `value` in canonical form, indented for humans.
pub fn encode_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(Error::Encode)
}
