//! Operation entity.

use super::{ExternalDocumentation, Parameter, Responses, SecurityRequirement};
use crate::object_macros::extensible_object;

extensible_object! {
    /// Describes a single API operation on a path.
    pub struct Operation;

    /// Declared fields of an [`Operation`].
    pub struct OperationProps {
        /// A verbose explanation of the operation behavior.
        "description" => description: String,
        /// MIME types the operation can consume, overriding the document-wide list.
        "consumes" => consumes: Vec<String>,
        /// MIME types the operation can produce, overriding the document-wide list.
        "produces" => produces: Vec<String>,
        /// Transfer protocols for the operation.
        "schemes" => schemes: Vec<String>,
        /// Tags for API documentation control.
        "tags" => tags: Vec<String>,
        /// A short summary of what the operation does.
        "summary" => summary: String,
        "externalDocs" => external_docs: Option<ExternalDocumentation>,
        /// Unique string used to identify the operation.
        "operationId" => id: String,
        /// Declares this operation to be deprecated.
        "deprecated" => deprecated: bool,
        /// Security schemes that apply to this operation.
        "security" => security: Vec<SecurityRequirement>,
        "parameters" => parameters: Vec<Parameter>,
        /// The list of possible responses as they are returned from executing this
        /// operation.
        "responses" => responses: Option<Responses>,
    }
}

impl Operation {
    /// Creates an empty operation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the operation id.
    pub fn operation_id(mut self, id: impl Into<String>) -> Self {
        self.props.id = id.into();
        self
    }

    /// Sets the summary.
    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.props.summary = summary.into();
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.props.description = description.into();
        self
    }

    /// Adds a tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.props.tags.push(tag.into());
        self
    }

    /// Adds a parameter.
    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.props.parameters.push(parameter);
        self
    }

    /// Sets the responses.
    pub fn responses(mut self, responses: Responses) -> Self {
        self.props.responses = Some(responses);
        self
    }

    /// Marks the operation as deprecated.
    pub fn deprecated(mut self) -> Self {
        self.props.deprecated = true;
        self
    }
}
