//! Conversation state machine.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// Lifecycle state of an intake conversation.
///
/// - `Open`: collecting information, no completion timestamp
/// - `Completed`: budget generated; terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    #[default]
    Open,
    Completed,
}

impl StateMachine for ConversationState {
    fn can_transition_to(&self, target: &Self) -> bool {
        matches!((self, target), (Self::Open, Self::Completed))
    }

    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            Self::Open => vec![Self::Completed],
            Self::Completed => vec![],
        }
    }
}
