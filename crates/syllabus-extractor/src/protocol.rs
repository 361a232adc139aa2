//! In-band response protocol
//!
//! The model answers each chunk with free text that carries four reserved
//! tokens:
//!
//! - `NULL`: no objectives in this chunk
//! - the stop signal (default `TASK_COMPLETE`): all objectives found, send no
//!   more chunks
//! - anything else: objectives separated by `|`; a segment ending in
//!   `CONCATNEXT` is incomplete and continues in the next chunk
//!
//! The reserved tokens cannot appear as ordinary objective text: an objective
//! that happens to end in `CONCATNEXT` or contain `|` is always interpreted
//! as protocol.
//!
//! Replies are turned into [`Signal`]s here; nothing downstream inspects raw
//! strings.

use crate::error::ExtractorError;

/// Separator between objectives in one reply
pub const DELIMITER: char = '|';

/// Suffix marking a segment as incomplete
pub const CONTINUATION_MARKER: &str = "CONCATNEXT";

/// Reply meaning "nothing found in this chunk"
pub const NULL_TOKEN: &str = "NULL";

/// One interpreted unit of a model reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Fragment to hold until a later segment completes it
    Continue(String),
    /// Segment that completes an objective
    Complete(String),
    /// The chunk contained no objectives
    Empty,
    /// The document is finished
    Stop,
}

/// Interpret a raw model reply
///
/// The reply is trimmed and compared exactly against `NULL` and then
/// `stop_signal`. Anything else is split on `|` and each trimmed segment
/// becomes either [`Signal::Continue`] (marker stripped, fragment trimmed) or
/// [`Signal::Complete`].
///
/// # Errors
///
/// A blank reply is [`ExtractorError::InvalidResponse`].
///
/// # Examples
///
/// ```
/// use syllabus_extractor::protocol::{parse_response, Signal};
///
/// let signals = parse_response("obj one.|obj two CONCATNEXT", "TASK_COMPLETE").unwrap();
/// assert_eq!(signals, vec![
///     Signal::Complete("obj one.".to_string()),
///     Signal::Continue("obj two".to_string()),
/// ]);
/// ```
pub fn parse_response(raw: &str, stop_signal: &str) -> Result<Vec<Signal>, ExtractorError> {
    let reply = raw.trim();

    if reply.is_empty() {
        return Err(ExtractorError::InvalidResponse("blank model reply".to_string()));
    }
    if reply == NULL_TOKEN {
        return Ok(vec![Signal::Empty]);
    }
    if reply == stop_signal {
        return Ok(vec![Signal::Stop]);
    }

    Ok(reply.split(DELIMITER).map(str::trim).map(classify_segment).collect())
}

fn classify_segment(segment: &str) -> Signal {
    match segment.strip_suffix(CONTINUATION_MARKER) {
        Some(fragment) => Signal::Continue(fragment.trim().to_string()),
        None => Signal::Complete(segment.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STOP: &str = "TASK_COMPLETE";

    #[test]
    fn test_null_reply() {
        assert_eq!(parse_response("NULL", STOP).unwrap(), vec![Signal::Empty]);
        assert_eq!(parse_response("  NULL\n", STOP).unwrap(), vec![Signal::Empty]);
    }

    #[test]
    fn test_stop_reply() {
        assert_eq!(parse_response("TASK_COMPLETE", STOP).unwrap(), vec![Signal::Stop]);
    }

    #[test]
    fn test_custom_stop_signal() {
        assert_eq!(parse_response("DONE", "DONE").unwrap(), vec![Signal::Stop]);
        assert_eq!(
            parse_response("TASK_COMPLETE", "DONE").unwrap(),
            vec![Signal::Complete("TASK_COMPLETE".to_string())]
        );
    }

    #[test]
    fn test_tokens_match_exactly() {
        assert_eq!(
            parse_response("null", STOP).unwrap(),
            vec![Signal::Complete("null".to_string())]
        );
        assert_eq!(
            parse_response("NULL.", STOP).unwrap(),
            vec![Signal::Complete("NULL.".to_string())]
        );
    }

    #[test]
    fn test_split_and_trim() {
        let signals = parse_response(" Describe anatomy |  Identify processes ", STOP).unwrap();
        assert_eq!(
            signals,
            vec![
                Signal::Complete("Describe anatomy".to_string()),
                Signal::Complete("Identify processes".to_string()),
            ]
        );
    }

    #[test]
    fn test_continuation_marker_stripped() {
        assert_eq!(
            parse_response("A CONCATNEXT", STOP).unwrap(),
            vec![Signal::Continue("A".to_string())]
        );
        assert_eq!(
            parse_response("radiologic studies,CONCATNEXT", STOP).unwrap(),
            vec![Signal::Continue("radiologic studies,".to_string())]
        );
    }

    #[test]
    fn test_marker_only_counts_as_suffix() {
        assert_eq!(
            parse_response("CONCATNEXT then more", STOP).unwrap(),
            vec![Signal::Complete("CONCATNEXT then more".to_string())]
        );
    }

    #[test]
    fn test_trailing_delimiter_yields_blank_segment() {
        let signals = parse_response("A | B |", STOP).unwrap();
        assert_eq!(signals.len(), 3);
        assert_eq!(signals[2], Signal::Complete(String::new()));
    }

    #[test]
    fn test_blank_reply_is_invalid() {
        assert!(matches!(
            parse_response("   ", STOP),
            Err(ExtractorError::InvalidResponse(_))
        ));
    }
}
