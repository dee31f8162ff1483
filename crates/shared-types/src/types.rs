use serde::{Deserialize, Serialize};

/// Process name shown in checklist results and reports
pub const INCORPORATION_PROCESS: &str = "Company Incorporation";

/// Label used when no known document type matches
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Known company-formation document types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DocumentType {
    #[serde(rename = "Articles of Association")]
    ArticlesOfAssociation,
    #[serde(rename = "Memorandum of Association")]
    MemorandumOfAssociation,
    #[serde(rename = "Incorporation Application Form")]
    IncorporationApplicationForm,
    #[serde(rename = "UBO Declaration Form")]
    UboDeclarationForm,
    #[serde(rename = "Register of Members and Directors")]
    RegisterOfMembersAndDirectors,
}

impl DocumentType {
    /// All known types, in checklist order
    pub const ALL: [DocumentType; 5] = [
        DocumentType::ArticlesOfAssociation,
        DocumentType::MemorandumOfAssociation,
        DocumentType::IncorporationApplicationForm,
        DocumentType::UboDeclarationForm,
        DocumentType::RegisterOfMembersAndDirectors,
    ];

    /// Human-readable label, identical to the serialized form
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::ArticlesOfAssociation => "Articles of Association",
            DocumentType::MemorandumOfAssociation => "Memorandum of Association",
            DocumentType::IncorporationApplicationForm => "Incorporation Application Form",
            DocumentType::UboDeclarationForm => "UBO Declaration Form",
            DocumentType::RegisterOfMembersAndDirectors => "Register of Members and Directors",
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Display label for a set of detected types: comma-joined, or "Unknown"
pub fn detected_label(types: &[DocumentType]) -> String {
    if types.is_empty() {
        return UNKNOWN_LABEL.to_string();
    }
    types
        .iter()
        .map(|t| t.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    High,
    Medium,
    Low,
}

/// A red flag found in one paragraph of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub document_section: String, // e.g., "para_4"
    pub issue: String,
    pub severity: Severity,
    pub suggestion: String,
    pub para_index: usize, // Original paragraph position in the document body
}

/// Outcome of comparing detected types against the required checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistResult {
    pub process: String,
    pub documents_uploaded: usize,
    pub required_documents: usize,
    pub missing_documents: Vec<String>,
}

/// An issue tagged with the file it was found in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportIssue {
    pub file: String,
    #[serde(flatten)]
    pub issue: Issue,
}

/// Structured summary of one review batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub timestamp: String,
    pub process: String,
    pub documents_uploaded: usize,
    pub required_documents: usize,
    pub missing_documents: Vec<String>,
    pub issues_found: Vec<ReportIssue>,
}

impl Report {
    /// Serialize to indented JSON (the `report.json` download)
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to serialize report: {}", e))
    }

    /// Deserialize from JSON
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to deserialize report: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_issue() -> Issue {
        Issue {
            document_section: "para_2".to_string(),
            issue: "Ambiguous phrase 'best efforts' found".to_string(),
            severity: Severity::Low,
            suggestion: "Consider replacing 'best efforts' with a specific, binding obligation."
                .to_string(),
            para_index: 2,
        }
    }

    #[test]
    fn test_detected_label_unknown_when_empty() {
        assert_eq!(detected_label(&[]), "Unknown");
    }

    #[test]
    fn test_detected_label_joins_in_order() {
        let label = detected_label(&[
            DocumentType::ArticlesOfAssociation,
            DocumentType::UboDeclarationForm,
        ]);
        assert_eq!(label, "Articles of Association, UBO Declaration Form");
    }

    #[test]
    fn test_document_type_serializes_as_label() {
        for doc_type in DocumentType::ALL {
            let json = serde_json::to_string(&doc_type).unwrap();
            assert_eq!(json, format!("\"{}\"", doc_type.label()));
        }
    }

    #[test]
    fn test_report_issue_is_flat() {
        let tagged = ReportIssue {
            file: "aoa.docx".to_string(),
            issue: sample_issue(),
        };
        let value = serde_json::to_value(&tagged).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();

        let mut expected = vec![
            "file",
            "document_section",
            "issue",
            "severity",
            "suggestion",
            "para_index",
        ];
        let mut actual = keys.clone();
        expected.sort();
        actual.sort();
        assert_eq!(actual, expected);
        assert_eq!(value["severity"], "Low");
        assert_eq!(value["para_index"], 2);
    }

    #[test]
    fn test_report_top_level_keys() {
        let report = Report {
            timestamp: "2026-01-01T00:00:00.000000Z".to_string(),
            process: INCORPORATION_PROCESS.to_string(),
            documents_uploaded: 1,
            required_documents: 5,
            missing_documents: vec!["UBO Declaration Form".to_string()],
            issues_found: vec![ReportIssue {
                file: "aoa.docx".to_string(),
                issue: sample_issue(),
            }],
        };

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "documents_uploaded",
                "issues_found",
                "missing_documents",
                "process",
                "required_documents",
                "timestamp",
            ]
        );
    }

    #[test]
    fn test_report_json_is_indented() {
        let report = Report {
            timestamp: "2026-01-01T00:00:00.000000Z".to_string(),
            process: INCORPORATION_PROCESS.to_string(),
            documents_uploaded: 0,
            required_documents: 5,
            missing_documents: vec![],
            issues_found: vec![],
        };
        let json = report.to_json().unwrap();
        assert!(json.contains("\n  \"timestamp\""));
        assert_eq!(Report::from_json(&json).unwrap(), report);
    }
}
