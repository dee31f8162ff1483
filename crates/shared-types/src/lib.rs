pub mod types;

pub use types::{
    detected_label, ChecklistResult, DocumentType, Issue, Report, ReportIssue, Severity,
    INCORPORATION_PROCESS, UNKNOWN_LABEL,
};
