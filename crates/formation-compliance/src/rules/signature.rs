// Signatory block check over the final paragraphs of a document

use shared_types::{Issue, Severity};

use super::new_issue;
use crate::patterns::SIGNATURE_PATTERN;

/// Number of trailing paragraphs expected to carry a signatory block
pub const SIGNATURE_WINDOW: usize = 3;

pub const SIGNATURE_ISSUE: &str = "Possible missing signature block near end of document";
pub const SIGNATURE_SUGGESTION: &str =
    "Ensure signatory name, designation, and signature block present.";

/// True if the paragraph at `position` (among `total` non-blank paragraphs)
/// is one of the final ones checked for a signature
pub fn in_signature_window(position: usize, total: usize) -> bool {
    position >= total.saturating_sub(SIGNATURE_WINDOW)
}

/// Flag a trailing paragraph with no signature text
///
/// Each paragraph in the window is judged on its own, so a document ending
/// in three unsigned paragraphs produces three issues.
pub fn check_signature_block(para_index: usize, text_lower: &str) -> Option<Issue> {
    if SIGNATURE_PATTERN.is_match(text_lower) {
        return None;
    }

    Some(new_issue(
        para_index,
        SIGNATURE_ISSUE,
        Severity::Medium,
        SIGNATURE_SUGGESTION,
    ))
}
