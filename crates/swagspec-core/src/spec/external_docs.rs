//! External documentation entity.

use crate::object_macros::extensible_object;

extensible_object! {
    /// A reference to external documentation.
    pub struct ExternalDocumentation;

    /// Declared fields of an [`ExternalDocumentation`] object.
    pub struct ExternalDocumentationProps {
        /// A short description of the target documentation.
        "description" => description: String,
        /// The URL of the target documentation.
        "url" => url: String,
    }
}

impl ExternalDocumentation {
    /// Creates a new `ExternalDocumentation` pointing at `url`.
    pub fn new(url: impl Into<String>) -> Self {
        let mut docs = Self::default();
        docs.props.url = url.into();
        docs
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.props.description = description.into();
        self
    }
}
