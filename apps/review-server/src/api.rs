//! API handlers for the review server
//!
//! Provides REST endpoints for:
//! - Batch document review (upload, findings, reviewed copies, report)
//! - Checklist listing

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use formation_compliance::{
    patterns::{keywords_for, INCORPORATION_CHECKLIST},
    FileReview, UploadedFile, REPORT_FILENAME,
};
use shared_docx::DOCX_MIME_TYPE;
use shared_types::{ChecklistResult, Issue, Report, INCORPORATION_PROCESS};

use crate::error::ServerError;
use crate::AppState;

/// Shown when a batch contains no files
pub const IDLE_MESSAGE: &str = "Upload .docx files to begin.";

const JSON_MIME_TYPE: &str = "application/json";

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Handler: GET /health
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "review-server",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Checklist response
#[derive(Serialize)]
pub struct ChecklistResponse {
    pub success: bool,
    pub process: &'static str,
    pub required_documents: Vec<RequiredDocumentInfo>,
    pub count: usize,
}

/// A required document and the keywords that identify it
#[derive(Serialize)]
pub struct RequiredDocumentInfo {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Handler: GET /api/checklist
pub async fn handle_checklist() -> Json<ChecklistResponse> {
    let required_documents: Vec<RequiredDocumentInfo> = INCORPORATION_CHECKLIST
        .iter()
        .map(|doc_type| RequiredDocumentInfo {
            name: doc_type.label().to_string(),
            keywords: keywords_for(*doc_type)
                .iter()
                .map(|kw| kw.to_string())
                .collect(),
        })
        .collect();

    let count = required_documents.len();

    Json(ChecklistResponse {
        success: true,
        process: INCORPORATION_PROCESS,
        required_documents,
        count,
    })
}

/// Review request body
#[derive(Deserialize)]
pub struct ReviewRequest {
    #[serde(default)]
    pub files: Vec<UploadPayload>,
}

/// One uploaded file
#[derive(Deserialize)]
pub struct UploadPayload {
    pub filename: String,
    /// Base64-encoded `.docx` bytes
    pub data: String,
}

/// A file offered for download
#[derive(Debug, Serialize)]
pub struct DownloadFile {
    pub filename: String,
    pub mime_type: &'static str,
    /// Base64-encoded content
    pub data: String,
}

/// Per-file review result
#[derive(Debug, Serialize)]
pub struct FileResult {
    pub filename: String,
    pub detected_type: Option<String>,
    pub issues: Vec<Issue>,
    pub reviewed_file: Option<DownloadFile>,
    pub error: Option<String>,
}

impl FileResult {
    fn failed(filename: String, error: String) -> Self {
        Self {
            filename,
            detected_type: None,
            issues: Vec::new(),
            reviewed_file: None,
            error: Some(error),
        }
    }
}

impl From<FileReview> for FileResult {
    fn from(file: FileReview) -> Self {
        match file {
            FileReview::Reviewed(review) => {
                let detected_type = Some(review.detected_label());
                FileResult {
                    filename: review.filename,
                    detected_type,
                    issues: review.issues,
                    reviewed_file: Some(DownloadFile {
                        filename: review.reviewed_filename,
                        mime_type: DOCX_MIME_TYPE,
                        data: STANDARD.encode(&review.reviewed_bytes),
                    }),
                    error: None,
                }
            }
            FileReview::Failed { filename, error } => FileResult::failed(filename, error.to_string()),
        }
    }
}

/// Review response
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub success: bool,
    pub batch_id: String,
    pub files: Vec<FileResult>,
    pub checklist: Option<ChecklistResult>,
    pub report: Option<Report>,
    pub report_file: Option<DownloadFile>,
    pub message: Option<String>,
}

/// Handler: POST /api/review
pub async fn handle_review(
    State(state): State<AppState>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Result<Json<ReviewResponse>, ServerError> {
    let Json(req) = payload?;
    let batch_id = Uuid::new_v4().to_string();

    if req.files.len() > state.max_files {
        return Err(ServerError::InvalidRequest(format!(
            "Too many files: {} uploaded, at most {} allowed per batch",
            req.files.len(),
            state.max_files
        )));
    }

    info!("Review batch {}: {} file(s)", batch_id, req.files.len());

    if req.files.is_empty() {
        return Ok(Json(ReviewResponse {
            success: true,
            batch_id,
            files: Vec::new(),
            checklist: None,
            report: None,
            report_file: None,
            message: Some(IDLE_MESSAGE.to_string()),
        }));
    }

    let decoded: Vec<(String, Result<Vec<u8>, String>)> = req
        .files
        .into_iter()
        .map(|file| {
            let bytes = decode_upload(&file);
            (file.filename, bytes)
        })
        .collect();

    let engine = state.engine.clone();
    let response = tokio::task::spawn_blocking(move || review_decoded(&engine, batch_id, decoded))
        .await
        .map_err(|e| ServerError::Internal(format!("Review task failed: {}", e)))??;

    Ok(Json(response))
}

/// Validate and decode one upload; failures stay scoped to that file
fn decode_upload(file: &UploadPayload) -> Result<Vec<u8>, String> {
    if !file.filename.to_lowercase().ends_with(".docx") {
        return Err(format!(
            "Unsupported file type for '{}': only .docx files are accepted",
            file.filename
        ));
    }
    STANDARD
        .decode(file.data.trim())
        .map_err(|e| format!("Invalid base64 data for '{}': {}", file.filename, e))
}

fn review_decoded(
    engine: &formation_compliance::ReviewEngine,
    batch_id: String,
    decoded: Vec<(String, Result<Vec<u8>, String>)>,
) -> Result<ReviewResponse, ServerError> {
    let uploads: Vec<UploadedFile<'_>> = decoded
        .iter()
        .filter_map(|(filename, bytes)| {
            bytes.as_ref().ok().map(|bytes| UploadedFile {
                filename: filename.as_str(),
                bytes: bytes.as_slice(),
            })
        })
        .collect();

    let batch = engine.review_batch(&uploads);
    let (reviewed, checklist, report) = match batch {
        Some(batch) => (batch.files, Some(batch.checklist), Some(batch.report)),
        None => (Vec::new(), None, None),
    };

    let mut reviewed = reviewed.into_iter();
    let mut files = Vec::with_capacity(decoded.len());
    for (filename, bytes) in decoded.iter() {
        match bytes {
            Ok(_) => match reviewed.next() {
                Some(file) => files.push(FileResult::from(file)),
                None => {
                    return Err(ServerError::Internal(format!(
                        "Missing review result for '{}'",
                        filename
                    )))
                }
            },
            Err(error) => {
                debug!("Rejected upload {}: {}", filename, error);
                files.push(FileResult::failed(filename.clone(), error.clone()));
            }
        }
    }

    let report_file = match &report {
        Some(report) => Some(DownloadFile {
            filename: REPORT_FILENAME.to_string(),
            mime_type: JSON_MIME_TYPE,
            data: STANDARD.encode(report.to_json().map_err(ServerError::Internal)?),
        }),
        None => None,
    };

    let message = if report.is_none() {
        Some("No valid .docx files in batch.".to_string())
    } else {
        None
    };

    Ok(ReviewResponse {
        success: true,
        batch_id,
        files,
        checklist,
        report,
        report_file,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = handle_health().await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.service, "review-server");
    }

    #[tokio::test]
    async fn test_checklist_lists_required_documents() {
        let response = handle_checklist().await;
        assert!(response.success);
        assert_eq!(response.count, 5);
        assert_eq!(response.process, "Company Incorporation");
        assert_eq!(response.required_documents[3].name, "UBO Declaration Form");
        assert!(response.required_documents[3]
            .keywords
            .contains(&"ultimate beneficial owner".to_string()));
    }

    #[test]
    fn test_skipped_annotations_not_exposed() {
        use formation_compliance::{AnnotationOutcome, DocumentReview, SkippedAnnotation};

        let review = DocumentReview {
            filename: "aoa.docx".to_string(),
            detected_types: Vec::new(),
            issues: Vec::new(),
            annotation: AnnotationOutcome {
                applied: 0,
                skipped: vec![SkippedAnnotation {
                    para_index: 42,
                    reason: "paragraph 42 out of range".to_string(),
                }],
            },
            reviewed_filename: "reviewed_aoa.docx".to_string(),
            reviewed_bytes: Vec::new(),
        };

        let json = serde_json::to_value(FileResult::from(FileReview::Reviewed(review))).unwrap();
        let keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();
        assert!(!json.to_string().contains("out of range"));
        assert_eq!(keys.len(), 5);
    }

    #[test]
    fn test_decode_rejects_other_extensions() {
        let file = UploadPayload {
            filename: "contract.pdf".to_string(),
            data: STANDARD.encode(b"%PDF"),
        };
        let err = decode_upload(&file).unwrap_err();
        assert!(err.contains("only .docx"));
    }

    #[test]
    fn test_decode_accepts_uppercase_extension() {
        let file = UploadPayload {
            filename: "AOA.DOCX".to_string(),
            data: STANDARD.encode(b"bytes"),
        };
        assert_eq!(decode_upload(&file).unwrap(), b"bytes".to_vec());
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        let file = UploadPayload {
            filename: "aoa.docx".to_string(),
            data: "***not base64***".to_string(),
        };
        assert!(decode_upload(&file).unwrap_err().contains("Invalid base64"));
    }
}
