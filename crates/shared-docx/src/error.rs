use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocxError {
    #[error("Failed to open DOCX package: {0}")]
    InvalidArchive(String),

    #[error("DOCX package is missing required part '{0}'")]
    MissingPart(&'static str),

    #[error("Malformed document XML: {0}")]
    Xml(String),

    #[error("Document part is not valid UTF-8: {0}")]
    Encoding(String),

    #[error("Paragraph {index} out of range (document has {count} paragraphs)")]
    ParagraphOutOfRange { index: usize, count: usize },

    #[error("Failed to write DOCX package: {0}")]
    Write(String),
}

impl From<quick_xml::Error> for DocxError {
    fn from(err: quick_xml::Error) -> Self {
        DocxError::Xml(err.to_string())
    }
}
