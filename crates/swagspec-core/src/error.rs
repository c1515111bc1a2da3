//! Errors produced while decoding, encoding or building specification objects.

use std::fmt;

/// Result type used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Location of a value inside a document, e.g. `paths./pets.get.responses.200`.
///
/// Segments are collected while an error unwinds out of nested decoders, so they
/// are stored innermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Returns `true` for the document root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the path segments from the outermost to the innermost one.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.iter().rev().map(String::as_str)
    }

    fn push_outer(&mut self, segment: String) {
        self.0.push(segment);
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("(root)");
        }
        for (idx, segment) in self.segments().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

/// Errors returned by the codec and by the typed builder APIs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input is not well-formed JSON.
    #[error("malformed JSON: {message}")]
    Syntax { message: String },

    /// A JSON object was expected but another kind of value was found.
    #[error("expected a JSON object at `{path}`, found {found}")]
    NotAnObject {
        path: FieldPath,
        found: &'static str,
    },

    /// A known field holds a value of the wrong JSON type.
    #[error("type mismatch at `{path}`: expected {expected}, found {found}")]
    TypeMismatch {
        path: FieldPath,
        expected: &'static str,
        found: &'static str,
    },

    /// The same key appears twice in one JSON object.
    #[error("duplicate key `{key}`")]
    DuplicateKey { key: String },

    /// An extension key equals a known field of the object.
    #[error("extension `{key}` collides with a known field of the same name")]
    ExtensionCollision { key: String },

    /// A key is neither a known field nor carries the `x-` extension prefix.
    #[error("unrecognized key `{key}` at `{path}`: extension keys must start with `x-`")]
    InvalidExtensionKey { key: String, path: FieldPath },

    /// A reference was constructed or decoded with an empty URI.
    #[error("reference URI must not be empty")]
    EmptyReference,

    /// The input nests objects and arrays deeper than the configured limit.
    #[error("nesting exceeds the maximum depth of {limit}")]
    DepthLimitExceeded { limit: usize },

    /// Serializing a document failed.
    #[error("failed to encode document: {0}")]
    Encode(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn syntax(message: impl fmt::Display) -> Self {
        Self::Syntax {
            message: message.to_string(),
        }
    }

    pub(crate) fn not_an_object(found: &'static str) -> Self {
        Self::NotAnObject {
            path: FieldPath::default(),
            found,
        }
    }

    pub(crate) fn type_mismatch(expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch {
            path: FieldPath::default(),
            expected,
            found,
        }
    }

    pub(crate) fn invalid_extension_key(key: impl Into<String>) -> Self {
        Self::InvalidExtensionKey {
            key: key.into(),
            path: FieldPath::default(),
        }
    }

    /// Prefixes the error location with the key or index it was found under.
    pub(crate) fn within(mut self, segment: impl fmt::Display) -> Self {
        match &mut self {
            Self::NotAnObject { path, .. }
            | Self::TypeMismatch { path, .. }
            | Self::InvalidExtensionKey { path, .. } => path.push_outer(segment.to_string()),
            _ => {}
        }
        self
    }

    /// Returns `true` for faults of the JSON text itself, which no `$ref` can shadow.
    pub(crate) fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::Syntax { .. } | Self::DuplicateKey { .. } | Self::DepthLimitExceeded { .. }
        )
    }

    /// The location of the offending value, for errors that carry one.
    pub fn path(&self) -> Option<&FieldPath> {
        match self {
            Self::NotAnObject { path, .. }
            | Self::TypeMismatch { path, .. }
            | Self::InvalidExtensionKey { path, .. } => Some(path),
            _ => None,
        }
    }

    /// The category of this error, independent of its message.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax { .. } => ErrorKind::Syntax,
            Self::NotAnObject { .. } => ErrorKind::NotAnObject,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::DuplicateKey { .. } => ErrorKind::DuplicateKey,
            Self::ExtensionCollision { .. } => ErrorKind::ExtensionCollision,
            Self::InvalidExtensionKey { .. } => ErrorKind::InvalidExtensionKey,
            Self::EmptyReference => ErrorKind::EmptyReference,
            Self::DepthLimitExceeded { .. } => ErrorKind::DepthLimitExceeded,
            Self::Encode(_) => ErrorKind::Encode,
        }
    }
}

/// Error categories, used to compare failures of the two decode strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Syntax,
    NotAnObject,
    TypeMismatch,
    DuplicateKey,
    ExtensionCollision,
    InvalidExtensionKey,
    EmptyReference,
    DepthLimitExceeded,
    Encode,
}
