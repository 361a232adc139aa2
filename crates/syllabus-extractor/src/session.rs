//! Extraction session state machine
//!
//! One session per document. The session owns the carry buffer (the
//! not-yet-complete objective from a previous chunk) and the list of emitted
//! objectives. It is fed one model reply per chunk, in chunk order, and moves
//! from `Running` to `Stopped` when the stop signal arrives.
//!
//! The session knows nothing about chunks or model calls; the driver in
//! [`crate::Extractor`] owns those.

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::protocol::{parse_response, Signal};
use std::mem;
use tracing::debug;

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepting replies
    Running,
    /// Stop signal received; further replies are ignored
    Stopped,
}

/// Final output of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOutcome {
    /// Objectives in emission order
    pub objectives: Vec<String>,
    /// Incomplete fragment left in the carry buffer, dropped from the output
    pub discarded_carry: Option<String>,
    /// Whether the stop signal ended the session
    pub stopped: bool,
}

/// Cross-chunk state for one document
///
/// # Examples
///
/// ```
/// use syllabus_extractor::{ExtractionSession, ExtractorConfig};
///
/// let mut session = ExtractionSession::new(&ExtractorConfig::default());
/// session.apply_response("A CONCATNEXT").unwrap();
/// session.apply_response("B|C").unwrap();
///
/// let outcome = session.finish();
/// assert_eq!(outcome.objectives, vec!["A B", "C"]);
/// ```
#[derive(Debug)]
pub struct ExtractionSession {
    stop_signal: String,
    drop_blank_objectives: bool,
    state: SessionState,
    carry: String,
    objectives: Vec<String>,
}

impl ExtractionSession {
    /// Start a session with an empty carry buffer
    pub fn new(config: &ExtractorConfig) -> Self {
        Self {
            stop_signal: config.stop_signal.clone(),
            drop_blank_objectives: config.drop_blank_objectives,
            state: SessionState::Running,
            carry: String::new(),
            objectives: Vec::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the stop signal has been received
    pub fn is_stopped(&self) -> bool {
        self.state == SessionState::Stopped
    }

    /// Pending fragment awaiting completion
    pub fn carry(&self) -> &str {
        &self.carry
    }

    /// Objectives emitted so far
    pub fn objectives(&self) -> &[String] {
        &self.objectives
    }

    /// Interpret one raw model reply and apply it
    ///
    /// # Errors
    ///
    /// Returns [`ExtractorError::InvalidResponse`] for a blank reply. The
    /// session is left untouched in that case.
    pub fn apply_response(&mut self, raw: &str) -> Result<SessionState, ExtractorError> {
        if self.is_stopped() {
            return Ok(self.state);
        }
        for signal in parse_response(raw, &self.stop_signal)? {
            self.apply(signal);
            if self.is_stopped() {
                break;
            }
        }
        Ok(self.state)
    }

    /// Apply one interpreted signal
    pub fn apply(&mut self, signal: Signal) {
        if self.is_stopped() {
            return;
        }
        match signal {
            Signal::Empty => {}
            Signal::Stop => self.state = SessionState::Stopped,
            Signal::Continue(fragment) => {
                self.carry.push_str(&fragment);
                self.carry.push(' ');
            }
            Signal::Complete(segment) => {
                let mut objective = mem::take(&mut self.carry);
                objective.push_str(&segment);
                if self.drop_blank_objectives && objective.trim().is_empty() {
                    debug!("skipping blank objective");
                    return;
                }
                self.objectives.push(objective);
            }
        }
    }

    /// End the session
    ///
    /// A non-empty carry buffer is reported as discarded and never becomes an
    /// objective.
    pub fn finish(self) -> SessionOutcome {
        let discarded_carry = if self.carry.trim().is_empty() {
            None
        } else {
            Some(self.carry.trim_end().to_string())
        };
        SessionOutcome {
            objectives: self.objectives,
            discarded_carry,
            stopped: self.state == SessionState::Stopped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> ExtractionSession {
        ExtractionSession::new(&ExtractorConfig::default())
    }

    #[test]
    fn test_new_session_is_running_and_empty() {
        let s = session();
        assert_eq!(s.state(), SessionState::Running);
        assert_eq!(s.carry(), "");
        assert!(s.objectives().is_empty());
    }

    #[test]
    fn test_null_changes_nothing() {
        let mut s = session();
        s.apply_response("first CONCATNEXT").unwrap();
        s.apply_response("NULL").unwrap();
        assert_eq!(s.carry(), "first ");
        assert!(s.objectives().is_empty());
    }

    #[test]
    fn test_continuation_stitching() {
        let mut s = session();
        s.apply_response("A CONCATNEXT").unwrap();
        assert_eq!(s.carry(), "A ");
        s.apply_response("B|C").unwrap();
        assert_eq!(s.objectives(), &["A B".to_string(), "C".to_string()]);
        assert_eq!(s.carry(), "");
    }

    #[test]
    fn test_continuation_across_several_chunks() {
        let mut s = session();
        s.apply_response("Assess the impact CONCATNEXT").unwrap();
        s.apply_response("of social factors CONCATNEXT").unwrap();
        s.apply_response("on health.").unwrap();
        assert_eq!(
            s.finish().objectives,
            vec!["Assess the impact of social factors on health."]
        );
    }

    #[test]
    fn test_stop_ignores_later_replies() {
        let mut s = session();
        s.apply_response("one").unwrap();
        assert_eq!(s.apply_response("TASK_COMPLETE").unwrap(), SessionState::Stopped);
        s.apply_response("two").unwrap();
        let outcome = s.finish();
        assert!(outcome.stopped);
        assert_eq!(outcome.objectives, vec!["one"]);
    }

    #[test]
    fn test_dangling_carry_is_discarded() {
        let mut s = session();
        s.apply_response("done.|half an objective CONCATNEXT").unwrap();
        let outcome = s.finish();
        assert_eq!(outcome.objectives, vec!["done."]);
        assert_eq!(outcome.discarded_carry.as_deref(), Some("half an objective"));
        assert!(!outcome.stopped);
    }

    #[test]
    fn test_blank_reply_leaves_state_untouched() {
        let mut s = session();
        s.apply_response("x CONCATNEXT").unwrap();
        assert!(s.apply_response("  ").is_err());
        assert_eq!(s.carry(), "x ");
    }

    #[test]
    fn test_blank_objectives_dropped_by_default() {
        let mut s = session();
        s.apply_response("A | B |").unwrap();
        assert_eq!(s.objectives(), &["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_blank_objectives_kept_when_configured() {
        let config = ExtractorConfig {
            drop_blank_objectives: false,
            ..ExtractorConfig::default()
        };
        let mut s = ExtractionSession::new(&config);
        s.apply_response("A | B |").unwrap();
        assert_eq!(s.objectives(), &["A".to_string(), "B".to_string(), String::new()]);
    }

    #[test]
    fn test_carry_completed_by_blank_segment_is_kept() {
        let mut s = session();
        s.apply_response("partial CONCATNEXT").unwrap();
        s.apply_response("|next").unwrap();
        assert_eq!(s.objectives(), &["partial ".to_string(), "next".to_string()]);
    }
}
