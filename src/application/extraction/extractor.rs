//! Field extractor: ordered rule layer first, LLM fallback for the rest.
//!
//! The extractor is pure with respect to the stored conversation: the same
//! transcript always yields the same rule-layer result, and the fallback
//! layer only fills fields the rules left unknown. Fallback failure never
//! raises; the affected fields simply stay unknown.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::domain::conversation::{ConversationTurn, Transcript, TurnRole};
use crate::domain::extraction::{
    apply_rules, FieldConfidence, FieldDomain, FieldExtraction, ProspectField,
};
use crate::ports::{CompletionClient, CompletionError, CompletionRequest};

/// Extracts qualification fields from an intake transcript.
#[derive(Clone)]
pub struct FieldExtractor {
    completion: Arc<dyn CompletionClient>,
    fallback_timeout: Duration,
}

impl FieldExtractor {
    /// Creates an extractor over the given completion client.
    pub fn new(completion: Arc<dyn CompletionClient>) -> Self {
        Self {
            completion,
            fallback_timeout: Duration::from_secs(20),
        }
    }

    /// Sets the fallback-call timeout.
    pub fn with_fallback_timeout(mut self, fallback_timeout: Duration) -> Self {
        self.fallback_timeout = fallback_timeout;
        self
    }

    /// Extracts all fields from the full transcript.
    pub async fn extract(&self, conversation: &[ConversationTurn]) -> FieldExtraction {
        let mut extraction = FieldExtraction::empty();
        if !conversation.has_user_input() {
            return extraction;
        }

        let user_text = conversation.user_text();
        apply_rules(&user_text, &mut extraction);

        let unknown = extraction.unknown_fields();
        if unknown.is_empty() {
            return extraction;
        }

        match timeout(self.fallback_timeout, self.fallback(conversation, &unknown)).await {
            Ok(Ok(fallback)) => extraction.merge_fallback(&fallback),
            Ok(Err(e)) => {
                tracing::debug!(error = %e, "Extraction fallback failed; fields stay unknown");
            }
            Err(_) => {
                tracing::debug!("Extraction fallback timed out; fields stay unknown");
            }
        }

        extraction
    }

    /// Asks the completion client for the fields the rule layer missed.
    async fn fallback(
        &self,
        conversation: &[ConversationTurn],
        fields: &[ProspectField],
    ) -> Result<FieldExtraction, CompletionError> {
        let request = CompletionRequest::new()
            .with_system_prompt(Self::schema_prompt(fields))
            .with_turn(TurnRole::User, conversation.user_text())
            .with_temperature(0.0)
            .with_max_tokens(800);

        let response = self.completion.complete(request).await?;
        Ok(Self::parse_fallback(&response.content))
    }

    /// Builds the fixed schema prompt for the requested fields.
    fn schema_prompt(fields: &[ProspectField]) -> String {
        let field_specs = fields
            .iter()
            .map(|field| match field.domain() {
                FieldDomain::Enumerated(values) => {
                    format!("  \"{}\": one of [{}]", field.name(), values.join(", "))
                }
                FieldDomain::Numeric => format!("  \"{}\": integer", field.name()),
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Extract qualification fields from this sales intake conversation.\n\
             Reply with a single JSON object. For each field you can determine,\n\
             emit {{\"value\": <value>, \"confidence\": \"clear\" | \"vague\"}}.\n\
             Omit fields the conversation says nothing about. Fields:\n{}",
            field_specs
        )
    }

    /// Parses the fallback reply leniently.
    ///
    /// Accepts `{"field": {"value": .., "confidence": ..}}` and the shorthand
    /// `{"field": "value"}`. Out-of-domain values and unrecognized fields are
    /// dropped; a reply with no JSON object yields an empty extraction.
    fn parse_fallback(content: &str) -> FieldExtraction {
        let mut extraction = FieldExtraction::empty();

        let Some(json) = extract_json_object(content) else {
            tracing::debug!("Fallback reply contained no JSON object");
            return extraction;
        };
        let Ok(parsed) = serde_json::from_str::<serde_json::Value>(&json) else {
            tracing::debug!("Fallback reply was not valid JSON");
            return extraction;
        };
        let Some(object) = parsed.as_object() else {
            return extraction;
        };

        for (key, entry) in object {
            let Some(field) = ProspectField::from_name(key) else {
                continue;
            };

            let (value, confidence) = match entry {
                serde_json::Value::String(s) => (s.clone(), FieldConfidence::Vague),
                serde_json::Value::Number(n) => (n.to_string(), FieldConfidence::Vague),
                serde_json::Value::Object(inner) => {
                    let Some(value) = inner.get("value").map(json_scalar_to_string) else {
                        continue;
                    };
                    let confidence = match inner.get("confidence").and_then(|c| c.as_str()) {
                        Some("clear") => FieldConfidence::Clear,
                        _ => FieldConfidence::Vague,
                    };
                    (value, confidence)
                }
                _ => continue,
            };

            // set() enforces the field's value domain.
            extraction.set(field, value, confidence);
        }

        extraction
    }
}

/// Renders a JSON scalar as the string our field domains expect.
fn json_scalar_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Cuts the outermost `{...}` span out of a possibly fenced reply.
fn extract_json_object(content: &str) -> Option<String> {
    let start = content.find('{')?;
    let end = content.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(content[start..=end].to_string())
}
