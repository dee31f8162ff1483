// Ambiguous obligation wording that weakens a binding clause

use shared_types::{Issue, Severity};

use super::new_issue;
use crate::patterns::AMBIGUOUS_PHRASES;

/// One low-severity issue per ambiguous obligation phrase in the paragraph
pub fn check_ambiguous_phrases(para_index: usize, text_lower: &str) -> Vec<Issue> {
    AMBIGUOUS_PHRASES
        .iter()
        .filter(|phrase| text_lower.contains(*phrase))
        .map(|phrase| {
            new_issue(
                para_index,
                format!("Ambiguous phrase '{}' found", phrase),
                Severity::Low,
                format!(
                    "Consider replacing '{}' with a specific, binding obligation.",
                    phrase
                ),
            )
        })
        .collect()
}
