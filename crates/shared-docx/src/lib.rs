//! Shared DOCX handling
//!
//! Loads Office Open XML word-processing packages, exposes their body
//! paragraphs in order, and writes annotated copies back out.

pub mod document;
pub mod error;
mod parser;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use document::{DocxDocument, Paragraph, DOCUMENT_PART, DOCX_MIME_TYPE};
pub use error::DocxError;
