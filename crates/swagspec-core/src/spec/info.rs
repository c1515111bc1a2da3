//! Info entity and related metadata types.

use crate::object_macros::extensible_object;

extensible_object! {
    /// Metadata about the API.
    ///
    /// The `Info` object can be used by clients if needed, and can be presented in
    /// tooling for convenience.
    pub struct Info;

    /// Declared fields of an [`Info`] object.
    pub struct InfoProps {
        /// A short description of the application.
        "description" => description: String,
        /// The title of the application.
        "title" => title: String,
        /// The Terms of Service for the API.
        "termsOfService" => terms_of_service: String,
        /// The contact information for the exposed API.
        "contact" => contact: Option<ContactInfo>,
        /// The license information for the exposed API.
        "license" => license: Option<License>,
        /// The version of the application API.
        "version" => version: String,
    }
}

impl Info {
    /// Creates a new `Info` with the given title and version.
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        let mut info = Self::default();
        info.props.title = title.into();
        info.props.version = version.into();
        info
    }

    /// Sets the description for the API.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.props.description = description.into();
        self
    }

    /// Sets the Terms of Service URL.
    pub fn terms_of_service(mut self, terms_of_service: impl Into<String>) -> Self {
        self.props.terms_of_service = terms_of_service.into();
        self
    }

    /// Sets the contact information.
    pub fn contact(mut self, contact: ContactInfo) -> Self {
        self.props.contact = Some(contact);
        self
    }

    /// Sets the license information.
    pub fn license(mut self, license: License) -> Self {
        self.props.license = Some(license);
        self
    }
}

extensible_object! {
    /// Contact information for the exposed API.
    pub struct ContactInfo;

    /// Declared fields of a [`ContactInfo`] object.
    pub struct ContactInfoProps {
        /// The identifying name of the contact person/organization.
        "name" => name: String,
        /// The URL pointing to the contact information.
        "url" => url: String,
        /// The email address of the contact person/organization.
        "email" => email: String,
    }
}

impl ContactInfo {
    /// Creates a new `ContactInfo` with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        let mut contact = Self::default();
        contact.props.name = name.into();
        contact
    }

    /// Sets the URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.props.url = url.into();
        self
    }

    /// Sets the email.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.props.email = email.into();
        self
    }
}

extensible_object! {
    /// License information for the exposed API.
    pub struct License;

    /// Declared fields of a [`License`] object.
    pub struct LicenseProps {
        /// The license name used for the API.
        "name" => name: String,
        /// A URL to the license used for the API.
        "url" => url: String,
    }
}

impl License {
    /// Creates a new `License` with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        let mut license = Self::default();
        license.props.name = name.into();
        license
    }

    /// Sets the URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.props.url = url.into();
        self
    }
}
