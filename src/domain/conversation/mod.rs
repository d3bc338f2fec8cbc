//! Intake conversation transcript types.

mod turn;

pub use turn::{ConversationTurn, Transcript, TurnRole};
