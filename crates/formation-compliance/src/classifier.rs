// Document type detection from keyword matches

use shared_docx::Paragraph;
use shared_types::DocumentType;

use crate::patterns::{contains_any, DOC_TYPE_KEYWORDS};

/// Detect document types from paragraph text by keyword matching
///
/// A type is detected when any of its keywords appears anywhere in the
/// lowercased text. Several types may match one document. An empty result
/// means the document is "Unknown".
pub fn classify(paragraphs: &[Paragraph]) -> Vec<DocumentType> {
    let text = paragraphs
        .iter()
        .map(|p| p.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    DOC_TYPE_KEYWORDS
        .iter()
        .filter(|(_, keywords)| contains_any(&text, keywords))
        .map(|(doc_type, _)| *doc_type)
        .collect()
}
