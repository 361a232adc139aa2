//! Priming messages and per-chunk message assembly
//!
//! A [`PrimingSet`] is the fixed prefix sent with every chunk: a system
//! message plus few-shot user/assistant pairs that teach the reply protocol.
//! The set is owned by the caller; [`PrimingSet::learning_objectives`]
//! provides the built-in one.

use crate::error::ExtractorError;
use crate::protocol::{CONTINUATION_MARKER, NULL_TOKEN};
use serde::Deserialize;
use syllabus_domain::{Message, Role};

/// Opening tag around raw document text
pub const INPUT_OPEN: &str = "<user_input>";

/// Closing tag around raw document text
pub const INPUT_CLOSE: &str = "</user_input>";

/// Instruction that precedes every chunk
const CHUNK_INSTRUCTION: &str = "Extract the learning objectives from the following text. \
Follow the same instructions and formatting as in the examples.";

/// Fixed message prefix for every chunk request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimingSet {
    messages: Vec<Message>,
}

#[derive(Deserialize)]
struct PrimingFile {
    messages: Vec<PrimingEntry>,
}

#[derive(Deserialize)]
struct PrimingEntry {
    role: String,
    content: String,
}

impl PrimingSet {
    /// Use the given messages as the priming prefix
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// Load a priming set from TOML
    ///
    /// ```toml
    /// [[messages]]
    /// role = "system"
    /// content = "You extract learning objectives."
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self, ExtractorError> {
        let file: PrimingFile = toml::from_str(toml_str)?;
        if file.messages.is_empty() {
            return Err(ExtractorError::Config(
                "priming file contains no messages".to_string(),
            ));
        }

        let messages = file
            .messages
            .into_iter()
            .map(|entry| {
                Role::parse(&entry.role)
                    .map(|role| Message::new(role, entry.content))
                    .ok_or_else(|| {
                        ExtractorError::Config(format!("unknown message role '{}'", entry.role))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { messages })
    }

    /// Built-in priming for learning-objective extraction
    ///
    /// The instructions name `stop_signal` so that the model is taught the
    /// same token the session listens for.
    pub fn learning_objectives(stop_signal: &str) -> Self {
        let system = format!(
            "You extract learning objectives from raw text. The user and assistant \
             messages that follow are worked examples; copy their formatting exactly. \
             Only ever reply with a list of objectives, {NULL_TOKEN}, {stop_signal}, or a \
             list whose last entry ends in {CONTINUATION_MARKER}."
        );

        let rules = format!(
            "Find the learning objectives in the text. Return them stripped of numbering \
             and category codes, separated by \"|\". If the text has no objectives, reply \
             {NULL_TOKEN}.\n{INPUT_OPEN}PROGRAM OBJECTIVES KNOWLEDGE Students will: K1. \
             Describe the structure and function of the major organ systems (MK); K2. Explain \
             the mechanisms of disease (MK, PC);{INPUT_CLOSE}"
        );

        let split = format!(
            "Text arrives in fixed-size pieces, so an objective may be cut off at the end. \
             If the last objective is incomplete, end it with {CONTINUATION_MARKER}. If the \
             text starts in the middle of an objective, return that leading fragment as your \
             first entry so it can be joined to the previous piece.\n{INPUT_OPEN}of the \
             patient. 3. Communicate effectively with patients and families. 4. Apply \
             evidence-based principles to the{INPUT_CLOSE}"
        );

        let finish = format!(
            "When objectives have already been found and the text has moved on to material \
             with no student learning objectives, reply {stop_signal} and no more text will \
             be sent.\n{INPUT_OPEN}APPENDIX B. Faculty governance. The committee meets \
             quarterly to review admissions policy.{INPUT_CLOSE}"
        );

        Self::new(vec![
            Message::system(system),
            Message::user(rules),
            Message::assistant(
                "Describe the structure and function of the major organ systems | \
                 Explain the mechanisms of disease",
            ),
            Message::user(split),
            Message::assistant(format!(
                "of the patient. | Communicate effectively with patients and families. | \
                 Apply evidence-based principles to the{CONTINUATION_MARKER}"
            )),
            Message::user(finish),
            Message::assistant(stop_signal.to_string()),
        ])
    }

    /// Priming messages
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Full message list for one chunk: priming followed by the wrapped chunk
    pub fn messages_for(&self, chunk: &str) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.messages.len() + 1);
        messages.extend(self.messages.iter().cloned());
        messages.push(Message::user(format!(
            "{CHUNK_INSTRUCTION}\n{INPUT_OPEN}{chunk}{INPUT_CLOSE}"
        )));
        messages
    }
}

impl Default for PrimingSet {
    fn default() -> Self {
        Self::learning_objectives(crate::config::DEFAULT_STOP_SIGNAL)
    }
}
