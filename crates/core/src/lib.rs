//! Core data model, error kinds, generation policy and text sanitization
//! for generated documents.

pub mod error;
pub mod policy;
pub mod sanitize;
pub mod types;

pub use error::{BackendError, Error, ErrorKind, Result};
pub use policy::GenerationPolicy;
pub use sanitize::{parse_outline_titles, sanitize, ContentSanitizer, SanitizeMode};
pub use types::{Document, DocumentKind, OutlineEntry, RefinementRecord, RenderedDocument, Section};
