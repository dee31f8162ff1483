use serde::Serialize;
use shared_docx::DocxDocument;
use shared_types::Issue;
use tracing::debug;

use crate::patterns::REVIEW_MARKER;

/// An issue that could not be written into the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedAnnotation {
    pub para_index: usize,
    pub reason: String,
}

/// Result of annotating one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnnotationOutcome {
    pub applied: usize,
    pub skipped: Vec<SkippedAnnotation>,
}

/// Text appended to a flagged paragraph
pub fn suggestion_note(issue: &Issue) -> String {
    format!("{} {}", REVIEW_MARKER, issue.suggestion)
}

/// Append a review suggestion to each flagged paragraph
///
/// Every issue is attempted independently. An issue whose paragraph does
/// not exist is recorded in `skipped` and never aborts the others.
pub fn annotate(document: &mut DocxDocument, issues: &[Issue]) -> AnnotationOutcome {
    let mut outcome = AnnotationOutcome::default();

    for issue in issues {
        match document.append_note(issue.para_index, &suggestion_note(issue)) {
            Ok(()) => outcome.applied += 1,
            Err(e) => {
                debug!("Skipping annotation for {}: {}", issue.document_section, e);
                outcome.skipped.push(SkippedAnnotation {
                    para_index: issue.para_index,
                    reason: e.to_string(),
                });
            }
        }
    }

    outcome
}
