pub mod annotate;
pub mod checklist;
pub mod classifier;
pub mod error;
pub mod patterns;
pub mod report;
pub mod rules;

use shared_docx::DocxDocument;
use shared_types::{detected_label, ChecklistResult, DocumentType, Issue, Report};
use tracing::{info, warn};

pub use annotate::{annotate, AnnotationOutcome, SkippedAnnotation};
pub use checklist::verify_checklist;
pub use classifier::classify;
pub use error::ReviewError;
pub use report::{assemble_report, REPORT_FILENAME};
pub use rules::scan_red_flags;

/// Prefix of the reviewed copy's file name
pub const REVIEWED_PREFIX: &str = "reviewed_";

/// A named upload as received from the user
#[derive(Debug, Clone, Copy)]
pub struct UploadedFile<'a> {
    pub filename: &'a str,
    pub bytes: &'a [u8],
}

/// Review of one document that parsed successfully
#[derive(Debug, Clone)]
pub struct DocumentReview {
    pub filename: String,
    pub detected_types: Vec<DocumentType>,
    pub issues: Vec<Issue>,
    pub annotation: AnnotationOutcome,
    pub reviewed_filename: String,
    pub reviewed_bytes: Vec<u8>,
}

impl DocumentReview {
    /// Comma-joined detected types, or "Unknown"
    pub fn detected_label(&self) -> String {
        detected_label(&self.detected_types)
    }
}

/// Per-file outcome within a batch
#[derive(Debug)]
pub enum FileReview {
    Reviewed(DocumentReview),
    Failed { filename: String, error: ReviewError },
}

impl FileReview {
    pub fn filename(&self) -> &str {
        match self {
            FileReview::Reviewed(review) => &review.filename,
            FileReview::Failed { filename, .. } => filename,
        }
    }
}

/// Everything produced for one upload batch
#[derive(Debug)]
pub struct BatchReview {
    pub files: Vec<FileReview>,
    pub checklist: ChecklistResult,
    pub report: Report,
}

/// ReviewEngine entry point
pub struct ReviewEngine;

impl ReviewEngine {
    pub fn new() -> Self {
        Self
    }

    /// Load, classify, scan and annotate a single document
    pub fn review_document(
        &self,
        filename: &str,
        bytes: &[u8],
    ) -> Result<DocumentReview, ReviewError> {
        let mut document =
            DocxDocument::from_bytes(bytes).map_err(|source| ReviewError::Parse {
                filename: filename.to_string(),
                source,
            })?;

        let paragraphs = document.paragraphs();
        let detected_types = classify(&paragraphs);
        let issues = scan_red_flags(&paragraphs);
        let annotation = annotate(&mut document, &issues);

        let reviewed_bytes = document
            .to_bytes()
            .map_err(|source| ReviewError::Serialize {
                filename: filename.to_string(),
                source,
            })?;

        info!(
            "Reviewed {}: type={}, issues={}, annotated={}",
            filename,
            detected_label(&detected_types),
            issues.len(),
            annotation.applied
        );

        Ok(DocumentReview {
            filename: filename.to_string(),
            detected_types,
            issues,
            annotation,
            reviewed_filename: format!("{}{}", REVIEWED_PREFIX, filename),
            reviewed_bytes,
        })
    }

    /// Review every upload in order and assemble the batch report
    ///
    /// Returns `None` for an empty batch. A file that fails to parse is
    /// reported on its own and contributes nothing to the checklist or
    /// the report; the remaining files are still reviewed.
    pub fn review_batch(&self, uploads: &[UploadedFile<'_>]) -> Option<BatchReview> {
        if uploads.is_empty() {
            return None;
        }

        let files: Vec<FileReview> = uploads
            .iter()
            .map(|upload| match self.review_document(upload.filename, upload.bytes) {
                Ok(review) => FileReview::Reviewed(review),
                Err(error) => {
                    warn!("{}", error);
                    FileReview::Failed {
                        filename: upload.filename.to_string(),
                        error,
                    }
                }
            })
            .collect();

        let reviewed: Vec<&DocumentReview> = files
            .iter()
            .filter_map(|file| match file {
                FileReview::Reviewed(review) => Some(review),
                FileReview::Failed { .. } => None,
            })
            .collect();

        let detected: Vec<Vec<DocumentType>> = reviewed
            .iter()
            .map(|review| review.detected_types.clone())
            .collect();
        let checklist = verify_checklist(&detected);

        let report = assemble_report(
            &checklist,
            reviewed
                .iter()
                .map(|review| (review.filename.as_str(), review.issues.as_slice())),
        );

        Some(BatchReview {
            files,
            checklist,
            report,
        })
    }
}

impl Default for ReviewEngine {
    fn default() -> Self {
        Self::new()
    }
}
