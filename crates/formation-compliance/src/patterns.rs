//! Keyword tables and regex patterns for company-formation review
//!
//! All tables are read-only statics: the `const` slices live in the binary
//! and the `lazy_static!` regexes compile once on first use.

use lazy_static::lazy_static;
use regex::Regex;
use shared_types::DocumentType;

/// Keywords (lowercase substrings) identifying each document type
pub const DOC_TYPE_KEYWORDS: &[(DocumentType, &[&str])] = &[
    (
        DocumentType::ArticlesOfAssociation,
        &["articles of association", "aoa"],
    ),
    (
        DocumentType::MemorandumOfAssociation,
        &["memorandum of association", "moa", "memorandum"],
    ),
    (
        DocumentType::IncorporationApplicationForm,
        &["incorporation application", "application form"],
    ),
    (
        DocumentType::UboDeclarationForm,
        &["ubo", "ultimate beneficial owner", "ubo declaration"],
    ),
    (
        DocumentType::RegisterOfMembersAndDirectors,
        &[
            "register of members",
            "register of directors",
            "register of members and directors",
        ],
    ),
];

/// Documents required for company incorporation, in reporting order
pub const INCORPORATION_CHECKLIST: &[DocumentType] = &[
    DocumentType::ArticlesOfAssociation,
    DocumentType::MemorandumOfAssociation,
    DocumentType::IncorporationApplicationForm,
    DocumentType::UboDeclarationForm,
    DocumentType::RegisterOfMembersAndDirectors,
];

/// Obligation phrases too vague to be enforced
pub const AMBIGUOUS_PHRASES: &[&str] = &[
    "best efforts",
    "commercially reasonable",
    "reasonable endeavours",
    "best endeavours",
];

/// Marker mentioning the expected jurisdiction
pub const ADGM_KEYWORD: &str = "adgm";

/// Prefix of every suggestion written into a reviewed document
pub const REVIEW_MARKER: &str = "[REVIEW SUGGESTION]";

lazy_static! {
    /// References to onshore UAE courts instead of ADGM
    pub static ref JURISDICTION_PATTERN: Regex =
        Regex::new(r"(?i)\b(uae|united arab emirates|federal court)\b").unwrap();

    /// Text that indicates a signatory block
    pub static ref SIGNATURE_PATTERN: Regex =
        Regex::new(r"(?i)(signature|signed by|_{18,})").unwrap();
}

/// Keywords configured for a document type
pub fn keywords_for(doc_type: DocumentType) -> &'static [&'static str] {
    DOC_TYPE_KEYWORDS
        .iter()
        .find(|(t, _)| *t == doc_type)
        .map(|(_, keywords)| *keywords)
        .unwrap_or(&[])
}

/// True if the lowercase text contains any of the keywords
pub fn contains_any(text_lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| text_lower.contains(kw))
}
