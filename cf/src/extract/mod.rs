//! Structured-update extraction from free-form agent replies
//!
//! A coordinator reply may embed one fenced JSON block proposing edits to the
//! course request, interleaved with prose. Extraction is a two-phase parse:
//! locate the block, then decode it. Both phases are total functions - a
//! malformed block is logged and the raw reply falls through unchanged, so
//! bad structured data never blocks the conversation.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::domain::CourseRequestUpdate;

/// First fenced JSON object in a reply, with or without a `json` tag
static BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("block regex is valid"));

/// Result of scanning one raw agent reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Reply with the honored block (delimiters included) stripped
    pub display_text: String,

    /// Decoded update, when a parseable block was present
    pub update: Option<CourseRequestUpdate>,
}

/// Locate the first fenced JSON block: span of the whole fence plus payload
fn locate(raw: &str) -> Option<(Range<usize>, &str)> {
    let caps = BLOCK_RE.captures(raw)?;
    let whole = caps.get(0)?;
    let payload = caps.get(1)?;
    Some((whole.range(), payload.as_str()))
}

/// Decode a block payload; `None` on any parse failure
fn decode(payload: &str) -> Option<CourseRequestUpdate> {
    match serde_json::from_str(payload) {
        Ok(update) => Some(update),
        Err(err) => {
            debug!(%err, "decode: discarding malformed structured-update block");
            None
        }
    }
}

/// Extract the first structured-update block from a raw reply
///
/// On success the block is stripped out of the display text. A missing or
/// malformed block yields the raw reply unchanged with no update. Only the
/// first block is honored; any further blocks stay in the display text
/// verbatim.
pub fn extract(raw: &str) -> Extraction {
    let Some((span, payload)) = locate(raw) else {
        return Extraction {
            display_text: raw.to_string(),
            update: None,
        };
    };
    let Some(update) = decode(payload) else {
        return Extraction {
            display_text: raw.to_string(),
            update: None,
        };
    };

    let mut display = String::with_capacity(raw.len() - span.len());
    display.push_str(&raw[..span.start]);
    display.push_str(&raw[span.end..]);

    Extraction {
        display_text: display.trim().to_string(),
        update: Some(update),
    }
}

/// Payload of the first fenced JSON block, if any
///
/// Shared with the pipeline, whose stage replies wrap their JSON the same way.
pub fn first_json_block(raw: &str) -> Option<&str> {
    locate(raw).map(|(_, payload)| payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_strips_block_and_decodes_update() {
        let raw = "Great idea!\n```json\n{\"course_credits\": 4}\n```";
        let extraction = extract(raw);
        assert_eq!(extraction.display_text, "Great idea!");
        let update = extraction.update.expect("update should decode");
        assert_eq!(update.course_credits, Some(4));
    }

    #[test]
    fn test_extract_without_block_returns_raw_text() {
        let raw = "Just prose, nothing structured here.";
        let extraction = extract(raw);
        assert_eq!(extraction.display_text, raw);
        assert!(extraction.update.is_none());
    }

    #[test]
    fn test_extract_malformed_block_falls_through_unchanged() {
        let raw = "Here you go:\n```json\n{\"course_credits\": }\n```\nSorry about that.";
        let extraction = extract(raw);
        assert_eq!(extraction.display_text, raw);
        assert!(extraction.update.is_none());
    }

    #[test]
    fn test_extract_wrong_type_is_treated_as_malformed() {
        let raw = "```json\n{\"course_credits\": \"four\"}\n```";
        let extraction = extract(raw);
        assert_eq!(extraction.display_text, raw);
        assert!(extraction.update.is_none());
    }

    #[test]
    fn test_extract_is_idempotent_on_display_text() {
        let raw = "Adjusting credits now.\n```json\n{\"course_credits\": 4}\n```\nAnything else?";
        let first = extract(raw);
        assert!(first.update.is_some());
        let second = extract(&first.display_text);
        assert_eq!(second.display_text, first.display_text);
        assert!(second.update.is_none());
    }

    #[test]
    fn test_extract_honors_only_first_block() {
        let raw = "One:\n```json\n{\"course_credits\": 4}\n```\nTwo:\n```json\n{\"course_credits\": 9}\n```";
        let extraction = extract(raw);
        let update = extraction.update.expect("first block should decode");
        assert_eq!(update.course_credits, Some(4));
        assert!(extraction.display_text.contains("course_credits\": 9"));
    }

    #[test]
    fn test_extract_untagged_fence() {
        let raw = "Update:\n```\n{\"course_level\": \"Graduate - Introductory\"}\n```";
        let extraction = extract(raw);
        let update = extraction.update.expect("untagged fence should decode");
        assert_eq!(update.course_level.as_deref(), Some("Graduate - Introductory"));
    }

    #[test]
    fn test_extract_nested_object_payload() {
        let raw = "Modules:\n```json\n{\"course_modules\": [{\"title\": \"Search\", \"learning_objectives\": [\"BFS\"]}]}\n```";
        let extraction = extract(raw);
        let update = extraction.update.expect("nested payload should decode");
        let modules = update.course_modules.expect("modules should be present");
        assert_eq!(modules[0].title, "Search");
    }

    #[test]
    fn test_first_json_block() {
        assert_eq!(first_json_block("```json\n{\"a\": 1}\n```"), Some("{\"a\": 1}"));
        assert_eq!(first_json_block("no fence"), None);
    }
}
