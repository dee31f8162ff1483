// Structured review report and its timestamp format

use chrono::{DateTime, Utc};
use shared_types::{ChecklistResult, Issue, Report, ReportIssue};

/// File name of the batch report download
pub const REPORT_FILENAME: &str = "report.json";

/// UTC timestamp in ISO-8601 with microseconds and a trailing `Z`
pub fn report_timestamp(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Build the batch report from the checklist and each file's issues
pub fn assemble_report<'a, I>(checklist: &ChecklistResult, file_issues: I) -> Report
where
    I: IntoIterator<Item = (&'a str, &'a [Issue])>,
{
    assemble_report_at(Utc::now(), checklist, file_issues)
}

pub fn assemble_report_at<'a, I>(
    now: DateTime<Utc>,
    checklist: &ChecklistResult,
    file_issues: I,
) -> Report
where
    I: IntoIterator<Item = (&'a str, &'a [Issue])>,
{
    let issues_found = file_issues
        .into_iter()
        .flat_map(|(file, issues)| {
            issues.iter().map(move |issue| ReportIssue {
                file: file.to_string(),
                issue: issue.clone(),
            })
        })
        .collect();

    Report {
        timestamp: report_timestamp(now),
        process: checklist.process.clone(),
        documents_uploaded: checklist.documents_uploaded,
        required_documents: checklist.required_documents,
        missing_documents: checklist.missing_documents.clone(),
        issues_found,
    }
}
