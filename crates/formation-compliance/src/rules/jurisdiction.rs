// Governing-law check: onshore UAE court references without ADGM

use shared_types::{Issue, Severity};

use super::new_issue;
use crate::patterns::{ADGM_KEYWORD, JURISDICTION_PATTERN};

pub const JURISDICTION_ISSUE: &str =
    "Potential incorrect jurisdiction reference (mentions UAE federal courts or ambiguous jurisdiction)";
pub const JURISDICTION_SUGGESTION: &str = "Specify ADGM Courts as jurisdiction where required.";

/// Flag references to UAE federal courts in a paragraph that never mentions ADGM
pub fn check_jurisdiction(para_index: usize, text_lower: &str) -> Option<Issue> {
    if !JURISDICTION_PATTERN.is_match(text_lower) || text_lower.contains(ADGM_KEYWORD) {
        return None;
    }

    Some(new_issue(
        para_index,
        JURISDICTION_ISSUE,
        Severity::High,
        JURISDICTION_SUGGESTION,
    ))
}
