//! Budget-generation intent detection.
//!
//! Detection is advisory and stateless: it is re-run on every user turn and
//! never remembers an earlier negative result.

use crate::domain::normalization::{contains_salary_info, extract_confirmation, Confirmation};

/// Phrases that ask for the budget to be built now.
pub const GENERATION_TRIGGERS: &[&str] = &[
    "buatin budget",
    "bikinin budget",
    "generate budget",
    "buat budget",
    "siap",
    "oke buatin",
    "lanjut",
    "udah cukup",
];

/// Message count at which generation fires regardless of content.
pub const DEFAULT_MESSAGE_THRESHOLD: usize = 6;

/// What the orchestrator should do with the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Continue,
    GenerateBudget,
}

/// Why generation was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentReason {
    TriggerPhrase(&'static str),
    MessageThreshold(usize),
}

/// Result of assessing one user turn.
///
/// `mentions_salary` and `confirmation` are logged signals only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentAssessment {
    pub intent: Intent,
    pub reason: Option<IntentReason>,
    pub mentions_salary: bool,
    pub confirmation: Option<Confirmation>,
}

impl IntentAssessment {
    pub fn should_generate(&self) -> bool {
        self.intent == Intent::GenerateBudget
    }
}

/// Keyword and length based intent detector.
#[derive(Debug, Clone)]
pub struct IntentDetector {
    triggers: &'static [&'static str],
    message_threshold: usize,
}

impl Default for IntentDetector {
    fn default() -> Self {
        Self::new(DEFAULT_MESSAGE_THRESHOLD)
    }
}

impl IntentDetector {
    pub fn new(message_threshold: usize) -> Self {
        Self {
            triggers: GENERATION_TRIGGERS,
            message_threshold,
        }
    }

    /// Assesses the latest user text given the accumulated message count
    /// (all roles, greeting included).
    pub fn assess(&self, latest_user_text: &str, message_count: usize) -> IntentAssessment {
        let text = latest_user_text.trim().to_lowercase();

        let reason = self
            .triggers
            .iter()
            .copied()
            .find(|phrase| text.contains(phrase))
            .map(IntentReason::TriggerPhrase)
            .or_else(|| {
                (message_count >= self.message_threshold)
                    .then_some(IntentReason::MessageThreshold(message_count))
            });

        IntentAssessment {
            intent: if reason.is_some() {
                Intent::GenerateBudget
            } else {
                Intent::Continue
            },
            reason,
            mentions_salary: contains_salary_info(&text),
            confirmation: extract_confirmation(&text),
        }
    }
}
