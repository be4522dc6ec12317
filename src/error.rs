//! Typed failures for the extraction layer.
//!
//! The portal's pages are undocumented and change without notice, so every
//! extractor distinguishes two situations:
//!
//! - **Empty result**: the page carries the literal no-data marker. That is
//!   a valid empty sequence, not an error, and never reaches this module.
//! - **Malformed document**: a selector, attribute or regex capture that the
//!   well-formed page guarantees is absent. That is a typed error carrying
//!   enough context (selector or pattern, content-type) to recognize a
//!   genuine upstream format change.
//!
//! Extractors never recover internally and never synthesize partial records;
//! the caller decides whether to re-fetch, report, or treat the failure as a
//! parse-contract violation.

use thiserror::Error;

/// Crate-local result alias used by every extractor.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Everything that can go wrong while turning a portal page into records.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// A date string carries no `Y-M-D H:M:S` timestamp anywhere.
    #[error("no `Y-M-D H:M:S` timestamp in {0:?}")]
    MalformedDate(String),

    /// A required element did not match its selector.
    #[error("{context}: no element matches {selector:?}")]
    MissingElement {
        context: &'static str,
        selector: String,
    },

    /// A required attribute is absent from a matched element.
    #[error("{context}: element {selector:?} has no {name:?} attribute")]
    MissingAttribute {
        context: &'static str,
        selector: String,
        name: &'static str,
    },

    /// A regex capture that the page shape guarantees found nothing.
    #[error("{context}: pattern {pattern:?} found nothing in {input:?}")]
    PatternMismatch {
        context: &'static str,
        pattern: &'static str,
        input: String,
    },

    /// Two positionally paired sequences disagree in length.
    #[error("{context}: expected {expected} entries, found {found}")]
    CountMismatch {
        context: &'static str,
        expected: usize,
        found: usize,
    },

    /// A JSON payload failed to deserialize.
    #[error("{context}: payload is not valid JSON")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Forum threads have no detail page; assemble them with `parse_forum`.
    #[error("forum threads have no detail page; assemble them with parse_forum")]
    ForumDetail,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_selector_context() {
        let err = ExtractError::MissingElement {
            context: "announcement list",
            selector: "#main".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("announcement list"));
        assert!(msg.contains("#main"));
    }

    #[test]
    fn test_display_carries_pattern_and_input() {
        let err = ExtractError::PatternMismatch {
            context: "assignment row",
            pattern: r"hw=(\d+)",
            input: "/course.php?f=hw".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("hw=(\\d+)"));
        assert!(msg.contains("/course.php?f=hw"));
    }
}
