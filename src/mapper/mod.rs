//! Descriptor-driven population of typed values from parsed documents.
//!
//! A type opts in by implementing [`Describe`], which lists the document keys it
//! understands and how each one lands on the value. [`Populator`] walks a
//! [`Document`] against that descriptor, recursing into nested objects and lists
//! of objects.

mod descriptor;
mod document;
mod populator;
mod registry;


pub use descriptor::{
    DescriptorBuilder, Describe, FieldDescriptor, FieldKind, TypeDescriptor, TypeRef,
};
pub use document::Document;
pub use populator::{Populator, UnknownKey, from_str, populate};

/// Mapper result type
pub type Result<T> = std::result::Result<T, PopulateError>;

/// Errors raised while turning a document into a typed value
#[derive(Debug, thiserror::Error)]
pub enum PopulateError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Cannot construct an instance of {type_name}")]
    Construction { type_name: &'static str },

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

impl From<serde_json::Error> for PopulateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// A single member could not be assigned from the document
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Mapping error on {type_name}.{key} at `{path}`: {reason}")]
pub struct MappingError {
    /// Type that declares the offending member
    pub type_name: &'static str,
    /// Document key of the offending member
    pub key: String,
    /// Location in the document, e.g. `genres[0].name`
    pub path: String,
    /// What went wrong
    pub reason: String,
}

impl PopulateError {
    /// The mapping failure, if this is one
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&MappingError> {
        match self {
            Self::Mapping(err) => Some(err),
            _ => None,
        }
    }
}
