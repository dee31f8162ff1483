//! Red-flag rules applied to each paragraph of a document

pub mod ambiguity;
pub mod jurisdiction;
pub mod signature;

use std::collections::HashSet;

use shared_docx::Paragraph;
use shared_types::{Issue, Severity};

/// Scan paragraphs for red flags
///
/// Rules run per paragraph in a fixed order (jurisdiction, signature
/// block, ambiguous phrases). Findings are deduplicated by paragraph index
/// and issue text, keeping the first occurrence. Scanning is pure: the
/// same input always yields the same issues.
pub fn scan_red_flags(paragraphs: &[Paragraph]) -> Vec<Issue> {
    let mut issues = Vec::new();
    let total = paragraphs.len();

    for (position, paragraph) in paragraphs.iter().enumerate() {
        let text_lower = paragraph.text.to_lowercase();

        issues.extend(jurisdiction::check_jurisdiction(paragraph.index, &text_lower));
        if signature::in_signature_window(position, total) {
            issues.extend(signature::check_signature_block(
                paragraph.index,
                &text_lower,
            ));
        }
        issues.extend(ambiguity::check_ambiguous_phrases(
            paragraph.index,
            &text_lower,
        ));
    }

    dedup_issues(issues)
}

/// Drop repeated (para_index, issue) pairs, keeping order
pub fn dedup_issues(issues: Vec<Issue>) -> Vec<Issue> {
    let mut seen = HashSet::new();
    issues
        .into_iter()
        .filter(|it| seen.insert((it.para_index, it.issue.clone())))
        .collect()
}

pub(crate) fn new_issue(
    para_index: usize,
    issue: impl Into<String>,
    severity: Severity,
    suggestion: impl Into<String>,
) -> Issue {
    Issue {
        document_section: format!("para_{}", para_index),
        issue: issue.into(),
        severity,
        suggestion: suggestion.into(),
        para_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn paragraphs(texts: &[&str]) -> Vec<Paragraph> {
        texts
            .iter()
            .enumerate()
            .map(|(index, text)| Paragraph {
                index,
                text: text.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_ten_paragraphs_without_signature() {
        let texts: Vec<String> = (0..10).map(|i| format!("Clause {} applies.", i)).collect();
        let refs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
        let issues = scan_red_flags(&paragraphs(&refs));

        let medium: Vec<&Issue> = issues
            .iter()
            .filter(|i| i.severity == Severity::Medium)
            .collect();
        assert_eq!(medium.len(), 3);
        assert_eq!(
            medium.iter().map(|i| i.para_index).collect::<Vec<_>>(),
            vec![7, 8, 9]
        );
        assert_eq!(medium[0].document_section, "para_7");
    }

    #[test]
    fn test_signature_in_tail_suppresses_only_that_paragraph() {
        let issues = scan_red_flags(&paragraphs(&[
            "Preamble",
            "Terms",
            "Signed by: ____________",
            "Date",
        ]));
        let flagged: Vec<usize> = issues
            .iter()
            .filter(|i| i.severity == Severity::Medium)
            .map(|i| i.para_index)
            .collect();
        assert_eq!(flagged, vec![1, 3]);
    }

    #[test]
    fn test_short_blank_line_still_missing_signature() {
        let issues = scan_red_flags(&paragraphs(&["Name: ______"]));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Medium);
        assert_eq!(issues[0].issue, signature::SIGNATURE_ISSUE);
    }

    #[test]
    fn test_plural_federal_courts_not_flagged() {
        let issues = scan_red_flags(&paragraphs(&[
            "Disputes go to the Federal Courts.",
            "Signature",
            "Signature",
            "Signature",
        ]));
        assert!(issues.is_empty());
    }

    #[test]
    fn test_uses_original_paragraph_index() {
        // Blank paragraphs were filtered out by the loader; indices keep their gaps
        let paragraphs = vec![
            Paragraph {
                index: 0,
                text: "Governed by the laws of the UAE".to_string(),
            },
            Paragraph {
                index: 4,
                text: "Signature: __________".to_string(),
            },
        ];
        let issues = scan_red_flags(&paragraphs);
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].para_index, 0);
        assert_eq!(issues[0].severity, Severity::High);
        assert_eq!(issues[1].para_index, 0);
        assert_eq!(issues[1].severity, Severity::Medium);
    }

    #[test]
    fn test_rule_order_within_paragraph() {
        let issues = scan_red_flags(&paragraphs(&[
            "The UAE federal court applies and parties use best efforts",
        ]));
        let severities: Vec<Severity> = issues.iter().map(|i| i.severity).collect();
        assert_eq!(
            severities,
            vec![Severity::High, Severity::Medium, Severity::Low]
        );
    }

    #[test]
    fn test_dedup_keeps_distinct_descriptions() {
        let issues = vec![
            new_issue(1, "A", Severity::Low, "fix a"),
            new_issue(1, "A", Severity::Low, "fix a again"),
            new_issue(1, "B", Severity::Low, "fix b"),
            new_issue(2, "A", Severity::Low, "fix a"),
        ];
        let deduped = dedup_issues(issues);
        assert_eq!(deduped.len(), 3);
        assert_eq!(deduped[0].suggestion, "fix a");
    }

    #[test]
    fn test_empty_document_has_no_issues() {
        assert!(scan_red_flags(&[]).is_empty());
    }

    proptest! {
        /// Property: scanning is deterministic and its output has no duplicates
        #[test]
        fn scan_is_idempotent(texts in prop::collection::vec(
            prop_oneof![
                Just("governed by the UAE federal court".to_string()),
                Just("use best efforts and best endeavours".to_string()),
                Just("Signature: ________".to_string()),
                Just("subject to ADGM courts in the UAE".to_string()),
                "[a-z ]{0,40}",
            ],
            0..15,
        )) {
            let refs: Vec<&str> = texts.iter().map(|s| s.as_str()).collect();
            let input = paragraphs(&refs);

            let first = scan_red_flags(&input);
            let second = scan_red_flags(&input);
            prop_assert_eq!(&first, &second);

            let rededuped = dedup_issues(first.clone());
            prop_assert_eq!(&rededuped, &first);

            for issue in &first {
                prop_assert!(issue.para_index < input.len());
            }
        }
    }
}
