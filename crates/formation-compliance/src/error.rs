use shared_docx::DocxError;
use thiserror::Error;

/// Failure reviewing a single uploaded file
#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Failed to parse '{filename}': {source}")]
    Parse {
        filename: String,
        #[source]
        source: DocxError,
    },

    #[error("Failed to write reviewed copy of '{filename}': {source}")]
    Serialize {
        filename: String,
        #[source]
        source: DocxError,
    },
}
