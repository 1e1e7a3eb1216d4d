//! Error types for document generation and rendering.

use crate::types::DocumentKind;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`], so callers can pick a retry policy
/// per kind instead of matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A bad parameter, detected before any backend call.
    Validation,
    /// The generative backend failed or returned unusable content.
    Generation,
    /// Layout or packaging of an output container failed.
    Render,
}

/// Failure reported by a generative text backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct BackendError(pub String);

impl BackendError {
    /// Create a backend error from any message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Errors that can occur while generating or rendering a document.
#[derive(Error, Debug)]
pub enum Error {
    /// A caller-supplied parameter was rejected.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The outline request to the backend failed.
    #[error("Outline generation failed: {0}")]
    OutlineGeneration(#[source] BackendError),

    /// Generating content for a specific section failed.
    #[error("Error generating content for section '{section}': {source}")]
    SectionGeneration {
        /// Title of the section being generated.
        section: String,
        #[source]
        source: BackendError,
    },

    /// ZIP archive error while writing or reading a package.
    #[error("ZIP error: {0}")]
    ZipError(String),

    /// XML serialization or parsing error.
    #[error("XML error: {0}")]
    XmlError(String),

    /// A renderer failed during export.
    #[error("Error exporting {kind} document: {source}")]
    Export {
        kind: DocumentKind,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::OutlineGeneration(_) | Error::SectionGeneration { .. } => ErrorKind::Generation,
            Error::ZipError(_) | Error::XmlError(_) | Error::Export { .. } => {
                ErrorKind::Render
            }
        }
    }

    /// Title of the section whose generation failed, if any.
    pub fn section_title(&self) -> Option<&str> {
        match self {
            Error::SectionGeneration { section, .. } => Some(section),
            _ => None,
        }
    }
}
