//! Conversation turns and transcript helpers.
//!
//! A transcript is an ordered, append-only sequence of turns owned by the
//! session that produced it. Extraction is always defined over the full
//! transcript, never over a single turn.

use serde::{Deserialize, Serialize};

/// Role of the turn's author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// System instructions (guides the assistant's behavior).
    System,
    /// Prospect input.
    User,
    /// Assistant reply.
    Assistant,
}

/// A single turn in an intake conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Who authored this turn.
    pub role: TurnRole,
    /// Turn content.
    pub text: String,
}

impl ConversationTurn {
    /// Creates a new turn.
    pub fn new(role: TurnRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    /// Creates a system turn.
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(TurnRole::System, text)
    }

    /// Creates a user turn.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(TurnRole::User, text)
    }

    /// Creates an assistant turn.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, text)
    }
}

/// Read-only helpers over an ordered slice of turns.
pub trait Transcript {
    /// Lower-cased concatenation of all user turns, newline separated.
    ///
    /// This is the text the extraction rule layer matches against.
    fn user_text(&self) -> String;

    /// Number of user turns in the transcript.
    fn user_turn_count(&self) -> usize;

    /// True when the transcript contains at least one user turn.
    fn has_user_input(&self) -> bool {
        self.user_turn_count() > 0
    }
}

impl Transcript for [ConversationTurn] {
    fn user_text(&self) -> String {
        self.iter()
            .filter(|t| t.role == TurnRole::User)
            .map(|t| t.text.to_lowercase())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn user_turn_count(&self) -> usize {
        self.iter().filter(|t| t.role == TurnRole::User).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_constructors_set_role() {
        assert_eq!(ConversationTurn::system("s").role, TurnRole::System);
        assert_eq!(ConversationTurn::user("u").role, TurnRole::User);
        assert_eq!(ConversationTurn::assistant("a").role, TurnRole::Assistant);
    }

    #[test]
    fn user_text_concatenates_only_user_turns_lowercased() {
        let turns = vec![
            ConversationTurn::system("You are an intake assistant"),
            ConversationTurn::user("We need HELP with invoicing"),
            ConversationTurn::assistant("Tell me more"),
            ConversationTurn::user("Budget is Approved"),
        ];

        let text = turns.user_text();
        assert_eq!(text, "we need help with invoicing\nbudget is approved");
    }

    #[test]
    fn user_turn_count_ignores_other_roles() {
        let turns = vec![
            ConversationTurn::assistant("Hi"),
            ConversationTurn::user("Hello"),
        ];
        assert_eq!(turns.user_turn_count(), 1);
        assert!(turns.has_user_input());
        assert!(!Vec::<ConversationTurn>::new().has_user_input());
    }

    #[test]
    fn turn_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TurnRole::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&TurnRole::Assistant).unwrap(),
            "\"assistant\""
        );
    }
}
