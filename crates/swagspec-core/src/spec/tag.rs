//! Tag entity for organizing operations.

use super::ExternalDocumentation;
use crate::object_macros::extensible_object;

extensible_object! {
    /// Organizes operations into logical groups.
    pub struct Tag;

    /// Declared fields of a [`Tag`].
    pub struct TagProps {
        /// The name of the tag. Always encoded.
        "name" [always] => name: String,
        /// A description for the tag.
        "description" => description: String,
        /// Additional external documentation for this tag.
        "externalDocs" => external_docs: Option<ExternalDocumentation>,
    }
}

impl Tag {
    /// Creates a new `Tag` with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        let mut tag = Self::default();
        tag.props.name = name.into();
        tag
    }

    /// Sets the description for the tag.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.props.description = description.into();
        self
    }

    /// Sets the external documentation for the tag.
    pub fn external_docs(mut self, external_docs: ExternalDocumentation) -> Self {
        self.props.external_docs = Some(external_docs);
        self
    }
}
