//! Conversation field extraction: rule layer plus LLM fallback, and the
//! per-session extraction service.

mod extractor;
mod service;

pub use extractor::FieldExtractor;
pub use service::{ExtractionError, ExtractionService, TurnAssessment};
