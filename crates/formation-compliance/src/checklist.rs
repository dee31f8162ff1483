// Incorporation checklist verification across an uploaded batch

use shared_types::{ChecklistResult, DocumentType, INCORPORATION_PROCESS};

use crate::patterns::INCORPORATION_CHECKLIST;

/// Compare the types detected across a batch with the incorporation checklist
///
/// `detected` holds one entry per reviewed file. Files with no detected
/// type do not count as uploaded documents.
pub fn verify_checklist(detected: &[Vec<DocumentType>]) -> ChecklistResult {
    let documents_uploaded = detected.iter().filter(|types| !types.is_empty()).count();

    let missing_documents = INCORPORATION_CHECKLIST
        .iter()
        .filter(|required| !detected.iter().any(|types| types.contains(*required)))
        .map(|required| required.label().to_string())
        .collect();

    ChecklistResult {
        process: INCORPORATION_PROCESS.to_string(),
        documents_uploaded,
        required_documents: INCORPORATION_CHECKLIST.len(),
        missing_documents,
    }
}
